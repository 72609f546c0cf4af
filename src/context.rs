use crate::content::Content;
use crate::node::Node;
use crate::rich::RichText;
use crate::template::TemplateStore;
use crate::value::Value;


/// State of one render call: the output, the scope stack, value lookup and
/// partial lookup.
///
/// Values and partials are borrowed for `'a`, so the renderer can push
/// resolved values back on the stack and render partial trees while the
/// context itself is borrowed mutably.
pub trait RenderingContext<'a, C: Content> {
    fn append(&mut self, content: &C);

    fn output(&self) -> &C;

    fn take_output(&mut self) -> C;

    fn enter(&mut self, scope: &'a Value<C>);

    fn leave(&mut self);

    /// The innermost scope.
    fn cursor(&self) -> Option<&'a Value<C>>;

    /// Looks `key` up in the scopes, innermost first.
    fn value(&self, key: &str) -> Option<&'a Value<C>>;

    fn partial(&self, _name: &str) -> Option<&'a Node<C>> {
        None
    }

    /// A context on the same scope stack with an empty output.
    fn new_lambda_context(&self) -> Box<dyn RenderingContext<'a, C> + 'a>;
}


/// Turns a key into a value of one scope.
pub trait Resolver<C: Content> {
    fn resolve<'v>(&self, key: &str, scope: &'v Value<C>) -> Option<&'v Value<C>>;
}

/// Default [`Resolver`]: `.` is the scope itself, other keys are
/// dot-separated paths into records.
///
/// Keys are trimmed, and `null` members count as missing.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyPathResolver;

impl<C: Content> Resolver<C> for KeyPathResolver {
    fn resolve<'v>(&self, key: &str, scope: &'v Value<C>) -> Option<&'v Value<C>> {
        let key = key.trim();
        let value = if key == "." {
            Some(scope)
        } else {
            key.split('.')
                .try_fold(scope, |value, name| value.get(name))
        };
        value.filter(|value| !value.is_null())
    }
}


pub struct DefaultContext<'a, C: Content> {
    output: C,
    stack: Vec<&'a Value<C>>,
    resolver: &'a dyn Resolver<C>,
    partials: Option<&'a dyn TemplateStore<C>>
}

pub type TextContext<'a> = DefaultContext<'a, String>;
pub type RichContext<'a> = DefaultContext<'a, RichText>;

impl<'a, C: Content> DefaultContext<'a, C> {
    pub fn new(root: &'a Value<C>) -> Self {
        DefaultContext {
            output: C::default(),
            stack: vec![root],
            resolver: &KeyPathResolver,
            partials: None
        }
    }

    pub fn with_partials(mut self, partials: &'a dyn TemplateStore<C>) -> Self {
        self.partials = Some(partials);
        self
    }

    pub fn with_resolver(mut self, resolver: &'a dyn Resolver<C>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn into_output(self) -> C {
        self.output
    }
}

impl<'a, C: Content> RenderingContext<'a, C> for DefaultContext<'a, C> {
    fn append(&mut self, content: &C) {
        self.output.append(content);
    }

    fn output(&self) -> &C {
        &self.output
    }

    fn take_output(&mut self) -> C {
        std::mem::take(&mut self.output)
    }

    fn enter(&mut self, scope: &'a Value<C>) {
        self.stack.push(scope);
    }

    fn leave(&mut self) {
        self.stack.pop();
    }

    fn cursor(&self) -> Option<&'a Value<C>> {
        self.stack.last().copied()
    }

    fn value(&self, key: &str) -> Option<&'a Value<C>> {
        self.stack.iter()
            .rev()
            .copied()
            .find_map(|scope| self.resolver.resolve(key, scope))
    }

    fn partial(&self, name: &str) -> Option<&'a Node<C>> {
        self.partials
            .and_then(|store| store.get(name))
            .map(|template| template.root())
    }

    fn new_lambda_context(&self) -> Box<dyn RenderingContext<'a, C> + 'a> {
        Box::new(DefaultContext {
            output: C::default(),
            stack: self.stack.clone(),
            resolver: self.resolver,
            partials: self.partials
        })
    }
}
