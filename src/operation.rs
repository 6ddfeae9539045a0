use std::fmt;

use crate::{
    error::{TransformError, TransformResult},
    grammar::{self, KEY_VALUE_SEPARATOR, KIND_SEPARATOR, OPTION_SEPARATOR},
    schema::{self, OperationSchema},
    value::OptionValue,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransformOption {
    pub name: String,
    pub value: OptionValue,
}

/// One named transformation step and its ordered option set.
///
/// Options keep the position of their first insertion; setting an existing name replaces the
/// value in place. Rendering never mutates the node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operation {
    kind: String,
    schema: Option<&'static OperationSchema>,
    options: Vec<TransformOption>,
}

impl Operation {
    /// Schema-less node: option names must be wire tokens and bounded values must sit inside
    /// their own bounds, nothing else is checked.
    pub fn new(kind: impl Into<String>) -> TransformResult<Self> {
        let kind = kind.into();
        grammar::check_wire_name(&kind)?;
        Ok(Self {
            kind,
            schema: None,
            options: Vec::new(),
        })
    }

    /// Node validated against the registered option table of `kind`.
    pub fn for_kind(kind: &str) -> TransformResult<Self> {
        schema::schema(kind)
            .map(Self::from_schema)
            .ok_or_else(|| TransformError::UnknownKind(kind.to_owned()))
    }

    pub(crate) fn from_schema(schema: &'static OperationSchema) -> Self {
        Self {
            kind: schema.kind.to_owned(),
            schema: Some(schema),
            options: Vec::new(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn schema(&self) -> Option<&'static OperationSchema> {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn options(&self) -> impl Iterator<Item = &TransformOption> {
        self.options.iter()
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|o| o.name == name)
            .map(|o| &o.value)
    }

    /// Validate and insert (or replace) `name`. The node is untouched when validation fails.
    pub fn set(&mut self, name: &str, value: OptionValue) -> TransformResult<&mut Self> {
        grammar::check_wire_name(name)?;
        value.check(name)?;
        let value = match self.schema {
            Some(schema) => {
                let ty = &schema.lookup(name)?.ty;
                ty.validate(name, &value)?;
                ty.normalize(value)
            }
            None => value,
        };
        self.put(name, value);
        Ok(self)
    }

    /// Like [`Operation::set`], converting a JSON value through the option's declared type.
    pub fn set_json(
        &mut self,
        name: &str,
        json: &serde_json::Value,
    ) -> TransformResult<&mut Self> {
        let value = match self.schema {
            Some(schema) => schema.lookup(name)?.ty.coerce_json(name, json)?,
            None => untyped_from_json(name, json)?,
        };
        self.set(name, value)
    }

    /// Remove `name`, keeping the relative order of the remaining options.
    pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
        let idx = self.options.iter().position(|o| o.name == name)?;
        Some(self.options.remove(idx).value)
    }

    /// Upsert without validation; callers guarantee `value` already fits the option.
    pub(crate) fn put(&mut self, name: &str, value: OptionValue) {
        match self.options.iter_mut().find(|o| o.name == name) {
            Some(slot) => slot.value = value,
            None => self.options.push(TransformOption {
                name: name.to_owned(),
                value,
            }),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.kind.len() + self.options.len() * 16);
        self.render_into(&mut out);
        out
    }

    pub(crate) fn render_into(&self, out: &mut String) {
        out.push_str(&self.kind);
        for (i, opt) in self.options.iter().enumerate() {
            out.push(if i == 0 {
                KIND_SEPARATOR
            } else {
                OPTION_SEPARATOR
            });
            out.push_str(&opt.name);
            out.push(KEY_VALUE_SEPARATOR);
            opt.value.encode_into(out);
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn untyped_from_json(name: &str, json: &serde_json::Value) -> TransformResult<OptionValue> {
    use serde_json::Value;

    match json {
        Value::Bool(b) => Ok(OptionValue::Bool(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(OptionValue::Int)
            .ok_or_else(|| TransformError::type_mismatch(name, "an integer")),
        Value::String(s) => Ok(OptionValue::Text(s.clone())),
        Value::Array(items) => items
            .iter()
            .map(|v| untyped_from_json(name, v))
            .collect::<TransformResult<Vec<_>>>()
            .map(OptionValue::List),
        Value::Null | Value::Object(_) => Err(TransformError::type_mismatch(
            name,
            "a boolean, integer, string or list",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> Operation {
        Operation::new("video_convert").unwrap()
    }

    #[test]
    fn empty_node_renders_bare_kind() {
        assert_eq!(node().render(), "video_convert");
        assert!(node().is_empty());
    }

    #[test]
    fn options_render_in_call_order() {
        let mut op = node();
        op.set("width", OptionValue::Int(640))
            .unwrap()
            .set("force", OptionValue::Bool(true))
            .unwrap()
            .set("fps", OptionValue::bounded(30, 1, 300))
            .unwrap();
        assert_eq!(op.render(), "video_convert=width:640,force:true,fps:30");
        assert_eq!(op.to_string(), op.render());
    }

    #[test]
    fn overwrite_keeps_first_position() {
        let mut op = node();
        op.set("a", OptionValue::Int(1)).unwrap();
        op.set("b", OptionValue::Int(2)).unwrap();
        op.set("a", OptionValue::Int(3)).unwrap();
        assert_eq!(op.render(), "video_convert=a:3,b:2");
        assert_eq!(op.len(), 2);
        assert_eq!(op.get("a"), Some(&OptionValue::Int(3)));
    }

    #[test]
    fn rejected_set_leaves_node_unchanged() {
        let mut op = node();
        op.set("audio_channels", OptionValue::bounded(2, 1, 12))
            .unwrap();
        let before = op.render();

        let err = op
            .set("audio_channels", OptionValue::bounded(13, 1, 12))
            .unwrap_err();
        assert!(matches!(err, TransformError::OutOfRange { .. }));
        assert_eq!(op.render(), before);

        assert!(matches!(
            op.set("Bad Name", true.into()).unwrap_err(),
            TransformError::InvalidOptionName(_)
        ));
        assert_eq!(op.render(), before);
    }

    #[test]
    fn kind_must_be_a_wire_name() {
        assert!(Operation::new("").is_err());
        assert!(Operation::new("video convert").is_err());
    }

    #[test]
    fn remove_preserves_remaining_order() {
        let mut op = node();
        op.set("a", OptionValue::Int(1)).unwrap();
        op.set("b", OptionValue::Int(2)).unwrap();
        op.set("c", OptionValue::Int(3)).unwrap();
        assert_eq!(op.remove("b"), Some(OptionValue::Int(2)));
        assert_eq!(op.remove("b"), None);
        assert_eq!(op.render(), "video_convert=a:1,c:3");
    }

    #[test]
    fn schema_backed_node_rejects_unknown_and_mistyped_options() {
        let mut op = Operation::for_kind("video_convert").unwrap();
        assert!(matches!(
            op.set("colour", OptionValue::Int(1)).unwrap_err(),
            TransformError::UnknownOption { .. }
        ));
        assert!(matches!(
            op.set("force", OptionValue::Int(1)).unwrap_err(),
            TransformError::TypeMismatch { .. }
        ));
        let err = op.set("audio_channels", OptionValue::Int(13)).unwrap_err();
        assert_eq!(err.violated_bound(), Some(12));
        assert!(op.is_empty());

        assert!(matches!(
            Operation::for_kind("teleport").unwrap_err(),
            TransformError::UnknownKind(_)
        ));
    }

    #[test]
    fn schemaless_node_rejects_enum_tokens_that_break_the_grammar() {
        let mut op = Operation::new("custom").unwrap();
        op.set("mode", OptionValue::Enum("fast")).unwrap();
        let before = op.render();

        let err = op
            .set("mode", OptionValue::Enum("a,evil:1/other"))
            .unwrap_err();
        assert!(matches!(err, TransformError::InvalidValue { .. }));
        assert_eq!(op.render(), before);
        assert_eq!(op.render(), "custom=mode:fast");
    }

    #[test]
    fn schemaless_node_rejects_invalid_resources() {
        use crate::value::Resource;

        let mut op = Operation::new("custom").unwrap();
        let err = op
            .set("file", OptionValue::Resource(Resource::Handle(String::new())))
            .unwrap_err();
        assert!(matches!(err, TransformError::InvalidValue { .. }));
        assert!(op.is_empty());
        assert_eq!(op.render(), "custom");
    }

    #[test]
    fn generic_set_stores_ranges_like_typed_setters() {
        use crate::ops::{Crop, Resize};

        let mut generic = Operation::for_kind("resize").unwrap();
        generic.set("width", OptionValue::Int(300)).unwrap();
        let mut typed = Resize::new();
        typed.width(300).unwrap();
        assert_eq!(generic, typed.into_operation());
        assert_eq!(generic.get("width"), Some(&OptionValue::bounded(300, 1, 10000)));

        let mut generic = Operation::for_kind("crop").unwrap();
        let dim = [0, 0, 100, 50].map(OptionValue::Int).to_vec();
        generic.set("dim", OptionValue::List(dim)).unwrap();
        let mut typed = Crop::new();
        typed.dim([0, 0, 100, 50]).unwrap();
        assert_eq!(generic, typed.into_operation());
    }

    #[test]
    fn set_json_goes_through_the_schema() {
        use serde_json::json;

        let mut op = Operation::for_kind("video_convert").unwrap();
        op.set_json("location", &json!("gcs"))
            .unwrap()
            .set_json("two_pass", &json!(true))
            .unwrap();
        assert_eq!(op.render(), "video_convert=location:gcs,two_pass:true");
        assert!(op.set_json("fps", &json!(0)).is_err());
        assert!(op.set_json("fps", &json!("30")).is_err());
    }

    #[test]
    fn untyped_json_maps_scalars_and_lists() {
        use serde_json::json;

        let mut op = Operation::new("custom").unwrap();
        op.set_json("dim", &json!([0, 0, 10, 10])).unwrap();
        op.set_json("label", &json!("a,b")).unwrap();
        assert_eq!(op.render(), "custom=dim:[0,0,10,10],label:a%2Cb");
        assert!(op.set_json("nested", &json!({"a": 1})).is_err());
    }

    #[test]
    fn render_is_idempotent() {
        let mut op = node();
        op.set("title", "Summer/Trip".into()).unwrap();
        assert_eq!(op.render(), op.render());
        assert_eq!(op.render(), "video_convert=title:Summer%2FTrip");
    }
}
