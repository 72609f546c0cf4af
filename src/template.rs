use std::collections::{BTreeSet, HashMap};
use crate::content::Content;
use crate::context::{DefaultContext, RenderingContext};
use crate::error::Result;
use crate::node::Node;
use crate::parser::Parser;
use crate::value::Value;


/// A compiled template.
pub struct Template<C: Content = String> {
    root: Node<C>
}

impl Template {
    pub fn from(input: &str) -> Result<Self> {
        Template::parse(&input.to_owned())
    }
}

impl<C: Content> Template<C> {
    pub fn parse(input: &C) -> Result<Self> {
        Template::with_parser(&Parser::new(), input)
    }

    pub fn with_parser(parser: &Parser, input: &C) -> Result<Self> {
        let root = parser.parse(input)?;
        Ok(Template { root })
    }

    pub fn root(&self) -> &Node<C> {
        &self.root
    }

    pub fn render(&self, data: &Value<C>) -> C {
        self.root.render(data)
    }

    pub fn render_with_partials(
        &self, data: &Value<C>, partials: &dyn TemplateStore<C>
    ) -> C {
        let mut ctx = DefaultContext::new(data).with_partials(partials);
        self.root.render_in(&mut ctx);
        ctx.into_output()
    }

    pub fn render_in<'a>(&self, ctx: &mut dyn RenderingContext<'a, C>) {
        self.root.render_in(ctx)
    }

    /// Renders against a record made of `args`.
    ///
    /// ```
    /// use mustache_rich::{Template, Value};
    ///
    /// let greet = Template::from("Hello {{name}}, you won {{& value}} dollars!").unwrap();
    /// let result = greet.call([
    ///     ("name", Value::from("Chris")),
    ///     ("value", Value::from(10000)),
    /// ]);
    /// assert_eq!(result, "Hello Chris, you won 10000 dollars!");
    /// ```
    pub fn call<K, I>(&self, args: I) -> C
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value<C>)>,
    {
        self.render(&Value::record(args))
    }

    pub fn keys(&self) -> BTreeSet<String> {
        self.root.keys()
    }

    pub fn has_keys(&self) -> bool {
        self.root.has_keys()
    }

    pub fn to_source(&self) -> String {
        self.root.to_source()
    }

    pub fn to_content(&self) -> C {
        self.root.to_content()
    }
}


pub trait TemplateStore<C: Content = String> {
    fn get(&self, name: &str) -> Option<&Template<C>>;
}


pub struct TemplateMap<C: Content = String> {
    templates: HashMap<String, Template<C>>
}

impl<C: Content> TemplateMap<C> {
    pub fn new() -> Self {
        TemplateMap { templates: HashMap::new() }
    }

    pub fn insert(&mut self, name: &str, template: Template<C>) {
        self.templates.insert(name.to_owned(), template);
    }

    pub fn load(&mut self, name: &str, input: &str) -> Result<()> {
        let template = Template::parse(&C::from_text(input))?;
        self.insert(name, template);
        Ok(())
    }
}

impl<C: Content> Default for TemplateMap<C> {
    fn default() -> Self {
        TemplateMap::new()
    }
}

impl<C: Content> TemplateStore<C> for TemplateMap<C> {
    fn get(&self, name: &str) -> Option<&Template<C>> {
        self.templates.get(name)
    }
}
