use log::{debug, trace, warn};
use crate::content::Content;
use crate::context::{DefaultContext, RenderingContext};
use crate::node::{write_nodes, Node};
use crate::parser::Parser;
use crate::value::{Kind, Lambda, Value};


impl<C: Content> Node<C> {
    /// Renders against `data` in a fresh [`DefaultContext`].
    pub fn render(&self, data: &Value<C>) -> C {
        let mut ctx = DefaultContext::new(data);
        self.render_in(&mut ctx);
        ctx.into_output()
    }

    /// Renders into `ctx`, resolving values and partials through it.
    pub fn render_in<'a>(&self, ctx: &mut dyn RenderingContext<'a, C>) {
        match self {
            Node::Empty => {},
            Node::Root(nodes) => render_nodes(nodes, ctx),
            Node::Text(text) => ctx.append(text),
            Node::Section(key, nodes) => render_section(key, nodes, ctx),
            Node::InvertedSection(key, nodes) => match ctx.value(key) {
                // a missing key renders neither branch
                Some(value) if !value.is_truthy() => render_nodes(nodes, ctx),
                _ => {}
            },
            Node::Tag(key) => render_tag(key, true, ctx),
            Node::UnescapedTag(key) => render_tag(key, false, ctx),
            Node::Partial(name) => match ctx.partial(name) {
                // partials share the scope of the caller
                Some(partial) => partial.render_in(ctx),
                None => debug!("partial {} not found", name)
            }
        }
    }
}

fn render_nodes<'a, C: Content>(nodes: &[Node<C>], ctx: &mut dyn RenderingContext<'a, C>) {
    for node in nodes {
        node.render_in(ctx);
    }
}

fn render_tag<'a, C: Content>(key: &C, escape: bool, ctx: &mut dyn RenderingContext<'a, C>) {
    let value = match ctx.value(&key.to_text()) {
        Some(value) => value,
        None => return
    };
    let content = match value {
        Value::Lambda(lambda) => return render_lambda(lambda, &[], ctx),
        Value::Rich(rich) => C::from_rich(rich, escape),
        _ => C::interpolate(&value.to_string(), key, escape)
    };
    ctx.append(&content);
}

fn render_section<'a, C: Content>(
    key: &str, nodes: &[Node<C>], ctx: &mut dyn RenderingContext<'a, C>
) {
    let value = match ctx.value(key) {
        Some(value) => value,
        None => return
    };
    if let Kind::Lambda(lambda) = value.classify() {
        return render_lambda(lambda, nodes, ctx);
    }
    if !value.is_truthy() {
        return;
    }
    match value.classify() {
        Kind::Sequence(items) => {
            for item in items {
                ctx.enter(item);
                render_nodes(nodes, ctx);
                ctx.leave();
            }
        },
        Kind::Record(_) => {
            ctx.enter(value);
            render_nodes(nodes, ctx);
            ctx.leave();
        },
        Kind::Scalar | Kind::Lambda(_) => render_nodes(nodes, ctx)
    }
}

/// Hands the section source to `lambda`, along with a callback rendering
/// template source in a lambda context. The source of the section itself is
/// rendered from the parsed nodes, anything else is parsed first.
fn render_lambda<'a, C: Content>(
    lambda: &Lambda<C>, nodes: &[Node<C>], ctx: &mut dyn RenderingContext<'a, C>
) {
    let mut source = C::default();
    write_nodes(nodes, &mut source);
    let result = {
        let scope: &dyn RenderingContext<'a, C> = &*ctx;
        let render = |text: &C| -> C {
            let mut lambda_ctx = scope.new_lambda_context();
            if *text == source {
                render_nodes(nodes, lambda_ctx.as_mut());
            } else {
                trace!("lambda renders new source {:?}", text);
                match Parser::new().parse(text) {
                    Ok(tree) => tree.render_in(lambda_ctx.as_mut()),
                    Err(err) => warn!("lambda source not rendered: {}", err)
                }
            }
            lambda_ctx.take_output()
        };
        lambda.call(&source, &render)
    };
    ctx.append(&result);
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use test_log::test;

    fn render(template: &str, data: &Value) -> String {
        Parser::new()
            .parse(&template.to_owned())
            .unwrap()
            .render(data)
    }

    #[test]
    fn empty_renders_nothing() {
        assert_eq!(Node::<String>::Empty.render(&Value::Null), "");
    }

    #[test]
    fn sequence_pushes_each_item() {
        let data = Value::record([
            ("items", Value::from(vec!["a", "b", "c"])),
        ]);
        assert_eq!(render("{{#items}}[{{.}}]{{/items}}", &data), "[a][b][c]");
    }

    #[test]
    fn scalar_section_keeps_scope() {
        let data = Value::record([
            ("flag", Value::from("yes")),
            ("name", Value::from("x")),
        ]);
        assert_eq!(render("{{#flag}}{{.}}{{/flag}}", &data), "");
        assert_eq!(render("{{#flag}}{{name}}{{/flag}}", &data), "x");
    }

    #[test]
    fn record_section_enters_record() {
        let data = Value::record([
            ("name", Value::from("outer")),
            ("person", Value::record([("name", Value::from("inner"))])),
        ]);
        assert_eq!(
            render("{{#person}}{{name}}{{/person}} {{name}}", &data),
            "inner outer"
        );
    }

    #[test]
    fn simple_lambda_gets_raw_source() {
        let data = Value::record([
            ("name", Value::from("Willy")),
            ("wrapped", Value::simple_lambda(|text: &String| format!("<b>{}</b>", text))),
        ]);
        assert_eq!(
            render("{{#wrapped}}{{name}} is awesome.{{/wrapped}}", &data),
            "<b>{{name}} is awesome.</b>"
        );
    }

    #[test]
    fn lambda_renders_other_source() {
        let data = Value::record([
            ("name", Value::from("Willy")),
            ("shout", Value::lambda(|_: &String, render: &dyn Fn(&String) -> String| {
                render(&"{{name}}!".to_owned())
            })),
        ]);
        assert_eq!(render("{{#shout}}ignored{{/shout}}", &data), "Willy!");
    }

    #[test]
    fn lambda_result_is_not_escaped() {
        let data = Value::record([
            ("wrapped", Value::simple_lambda(|_: &String| "<i>".to_owned())),
        ]);
        assert_eq!(render("{{#wrapped}}x{{/wrapped}}", &data), "<i>");
    }

    #[test]
    fn tag_calls_lambda_with_empty_source() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let data = Value::record([
            ("next", Value::simple_lambda(move |text: &String| {
                counter.set(counter.get() + 1);
                format!("{}{}", text, counter.get())
            })),
        ]);
        assert_eq!(render("{{next}} {{next}}", &data), "1 2");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn missing_and_falsy_keys() {
        let data = Value::record([("no", Value::from(false))]);
        assert_eq!(render("a{{#x}}b{{/x}}{{^x}}c{{/x}}d", &data), "ad");
        assert_eq!(render("a{{#no}}b{{/no}}{{^no}}c{{/no}}d", &data), "acd");
    }
}
