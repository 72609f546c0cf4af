//! A logic-less Mustache template compiler and renderer, for plain text and
//! for rich text.
//!
//! A [Template] parsed from source is an immutable tree of [Node]s. It is
//! rendered by walking the tree in a [RenderingContext], which owns the
//! output and a stack of scopes against which keys are resolved into
//! [Value]s. Partials come from a [TemplateStore].
//!
//! Supported tags are variables (`{{name}}`, unescaped `{{{name}}}` and
//! `{{& name}}`), sections (`{{#name}}...{{/name}}`), inverted sections
//! (`{{^name}}...{{/name}}`) and partials (`{{> name}}`). A section whose
//! value is a [Lambda] hands its unrendered source to the lambda.
//!
//! Templates and output come in two flavors implementing [Content]:
//! [String], where values are HTML escaped, and [RichText], where every
//! fragment carries its own formatting and values take the formatting of
//! their tag.
//!
//!
//! # Samples
//!
//! ## Hello world
//!
//! ```
//! use mustache_rich::{Template, Value, JsonValue};
//!
//! let text = "hello, {{you}}!";
//! let data = r#"{
//!     "you": "world"
//! }"#;
//!
//! let template = Template::from(text).unwrap();
//! let context = serde_json::from_str::<JsonValue>(data).unwrap();
//!
//! let result = template.render(&Value::from(&context));
//!
//! assert_eq!(result, "hello, world!")
//! ```
//!
//! ## Hello team
//!
//! ```
//! use mustache_rich::{Template, Value, YamlValue};
//! let text = "{{#team}}hello, {{address}} {{name}}! {{/team}}";
//! let data = r#"
//!   team:
//!     - name: john
//!       address: little
//!     - name: 42
//!       address: citizen
//! "#;
//!
//! let template = Template::from(text).unwrap();
//! let context = serde_yaml::from_str::<YamlValue>(data).unwrap();
//!
//! let result = template.render(&Value::from(&context));
//! assert_eq!(result, "hello, little john! hello, citizen 42! ");
//! ```
//!
//! ## Rich text
//!
//! ```
//! use mustache_rich::{Attributes, RichText, Template, Value};
//!
//! let bold = Attributes::from([("weight".to_owned(), "bold".to_owned())]);
//! let mut text = RichText::plain("Hello ");
//! text.push_styled("{{name}}", bold.clone());
//!
//! let template = Template::parse(&text).unwrap();
//! let result = template.render(&Value::record([("name", Value::from("<Chris>"))]));
//!
//! let mut expected = RichText::plain("Hello ");
//! expected.push_styled("<Chris>", bold);
//! assert_eq!(result, expected);
//! ```
mod content;
mod context;
mod error;
mod json;
mod node;
mod parser;
mod reader;
mod render;
mod rich;
mod template;
mod value;
mod yaml;

pub use self::content::Content;
pub use self::context::{
    DefaultContext, KeyPathResolver, RenderingContext, Resolver, RichContext, TextContext
};
pub use self::error::{Error, Result};
pub use self::json::JsonValue;
pub use self::node::Node;
pub use self::parser::{Options, Parser};
pub use self::rich::{Attributes, Fragment, RichText};
pub use self::template::{Template, TemplateMap, TemplateStore};
pub use self::value::{Kind, Lambda, Record, Value};
pub use self::yaml::YamlValue;
