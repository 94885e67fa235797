//! Attribute specifications and the lookup table rules consult.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Built-in HTML specification subset.
const HTML_SPEC_JSON: &str = include_str!("../data/html-spec.json");

/// Semantic value type of a declared attribute.
///
/// Only a handful of types have value checks; the rest are accepted as-is
/// until a checker is written for them.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    String,
    NonEmptyString,
    Boolean,
    Function,
    Date,
    DateTime,
    Int,
    Uint,
    Float,
    NonZeroUint,
    ZeroToOne,
    ColSpan,
    RowSpan,
    TabIndex,
    ReferrerPolicy,
    #[serde(rename = "CSSBlendMode")]
    CssBlendMode,
    #[serde(rename = "CSSAngle")]
    CssAngle,
    #[serde(rename = "CSSOpacity")]
    CssOpacity,
    #[serde(rename = "URLHash")]
    UrlHash,
    #[serde(rename = "URL")]
    Url,
    #[serde(rename = "AbsoluteURL")]
    AbsoluteUrl,
    #[serde(rename = "URLList")]
    UrlList,
    #[serde(rename = "DOMID")]
    DomId,
    #[serde(rename = "DOMIDList")]
    DomIdList,
    ItemProp,
    Accept,
    AutoComplete,
    #[serde(rename = "BCP47")]
    Bcp47,
    Charset,
    Color,
    Coords,
    CrossOrigin,
    IconSize,
    #[serde(rename = "MIMEType")]
    MimeType,
    MediaQueryList,
    NavigableTargetName,
    NavigableTargetNameOrKeyword,
    Pattern,
    Rel,
    Sandbox,
    SourceSizeList,
    Srcset,
    Target,
    #[serde(rename = "UniqueID")]
    UniqueId,
    #[serde(rename = "CSSDeclarationList")]
    CssDeclarationList,
    #[serde(rename = "CSSColor")]
    CssColor,
    #[serde(rename = "CSSFontFamily")]
    CssFontFamily,
    #[serde(rename = "CSSFontSize")]
    CssFontSize,
    #[serde(rename = "CSSFontWeight")]
    CssFontWeight,
    #[serde(rename = "CSSDisplay")]
    CssDisplay,
    #[serde(rename = "CSSTransformList")]
    CssTransformList,
    #[serde(rename = "CSSCursor")]
    CssCursor,
    #[serde(rename = "SVGAngle")]
    SvgAngle,
    #[serde(rename = "SVGLength")]
    SvgLength,
    #[serde(rename = "SVGLengthList")]
    SvgLengthList,
    #[serde(rename = "SVGNumber")]
    SvgNumber,
    #[serde(rename = "SVGNumberList")]
    SvgNumberList,
    #[serde(rename = "SVGNumberOptionalNumber")]
    SvgNumberOptionalNumber,
    #[serde(rename = "SVGPathData")]
    SvgPathData,
    #[serde(rename = "SVGPoints")]
    SvgPoints,
    #[serde(rename = "SVGPreserveAspectRatio")]
    SvgPreserveAspectRatio,
    #[serde(rename = "SVGTransformList")]
    SvgTransformList,
    #[serde(rename = "SVGViewBox")]
    SvgViewBox,
    #[serde(rename = "SVGClockValue")]
    SvgClockValue,
    #[serde(rename = "SVGKeyTimes")]
    SvgKeyTimes,
    #[serde(rename = "SVGKeySplines")]
    SvgKeySplines,
    #[serde(rename = "SVGKeyPoints")]
    SvgKeyPoints,
    #[serde(rename = "SVGIRI")]
    SvgIri,
    #[serde(rename = "SVGFuncIRI")]
    SvgFuncIri,
    #[serde(rename = "SVGFilterPrimitiveReference")]
    SvgFilterPrimitiveReference,
    #[serde(rename = "SVGAnimatableValue")]
    SvgAnimatableValue,
    #[serde(rename = "SVGAttributeName")]
    SvgAttributeName,
    #[serde(rename = "SVGPercentage")]
    SvgPercentage,
    #[serde(rename = "SVGFontSize")]
    SvgFontSize,
    /// A type name this build does not know about.
    #[serde(other)]
    Unknown,
}

/// Declared value shape: a closed enumeration or a named semantic type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecType {
    /// Closed list of lower-case literals.
    Enum {
        /// Accepted values.
        #[serde(rename = "enum", deserialize_with = "lowercase_values")]
        values: Vec<String>,
    },
    /// A named semantic type.
    Named(AttributeType),
}

impl SpecType {
    /// Creates an enumerated type from literals, lower-casing them.
    #[must_use]
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Enum {
            values: values.into_iter().map(|v| v.as_ref().to_lowercase()).collect(),
        }
    }
}

fn lowercase_values<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let values = Vec::<String>::deserialize(deserializer)?;
    Ok(values.into_iter().map(|v| v.to_lowercase()).collect())
}

impl From<AttributeType> for SpecType {
    fn from(ty: AttributeType) -> Self {
        Self::Named(ty)
    }
}

/// Declaration of one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    /// Attribute name (lower-case).
    pub name: String,
    /// Accepted value shape.
    #[serde(rename = "type")]
    pub ty: SpecType,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the attribute is deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

impl AttributeSpec {
    /// Creates a spec with the given name and type.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<SpecType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            description: None,
            deprecated: false,
        }
    }
}

/// Source of attribute declarations.
pub trait SpecLookup: Send + Sync {
    /// Returns the declaration of `attr` on `element`, if declared.
    fn attribute(&self, element: &str, attr: &str) -> Option<&AttributeSpec>;

    /// Returns true if the element itself is known.
    fn has_element(&self, element: &str) -> bool;
}

/// Declarations for one element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSpec {
    /// Element-specific attributes.
    #[serde(default)]
    pub attributes: Vec<AttributeSpec>,
    /// Whether global attributes apply.
    #[serde(default = "default_true")]
    pub global_attrs: bool,
}

fn default_true() -> bool {
    true
}

/// Attribute specification table keyed by element name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecTable {
    /// Attributes allowed on every element that accepts global attributes.
    #[serde(default)]
    pub global: Vec<AttributeSpec>,
    /// Per-element declarations.
    #[serde(default)]
    pub elements: HashMap<String, ElementSpec>,
}

impl SpecTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the built-in HTML subset.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled table fails to decode.
    pub fn html() -> Result<Self, SpecError> {
        Self::from_json(HTML_SPEC_JSON)
    }

    /// Parses a table from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a table.
    pub fn from_json(content: &str) -> Result<Self, SpecError> {
        serde_json::from_str(content).map_err(|e| SpecError::Parse {
            message: e.to_string(),
        })
    }

    /// Adds or replaces an element declaration.
    #[must_use]
    pub fn with_element(mut self, name: impl Into<String>, spec: ElementSpec) -> Self {
        self.elements.insert(name.into(), spec);
        self
    }

    /// Adds a global attribute.
    #[must_use]
    pub fn with_global(mut self, spec: AttributeSpec) -> Self {
        self.global.push(spec);
        self
    }
}

impl SpecLookup for SpecTable {
    fn attribute(&self, element: &str, attr: &str) -> Option<&AttributeSpec> {
        let element = self.elements.get(&element.to_ascii_lowercase())?;
        let attr = attr.to_ascii_lowercase();

        element
            .attributes
            .iter()
            .find(|a| a.name == attr)
            .or_else(|| {
                element
                    .global_attrs
                    .then(|| self.global.iter().find(|a| a.name == attr))
                    .flatten()
            })
    }

    fn has_element(&self, element: &str) -> bool {
        self.elements.contains_key(&element.to_ascii_lowercase())
    }
}

/// Errors loading a specification table.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// The table JSON is malformed.
    #[error("Failed to parse specification table: {message}")]
    Parse {
        /// Decoder message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_loads() {
        let table = SpecTable::html().expect("built-in table");
        assert!(table.has_element("td"));
        assert!(table.has_element("DIV"));
        assert!(!table.has_element("my-widget"));
    }

    #[test]
    fn test_lookup_element_and_global() {
        let table = SpecTable::html().expect("built-in table");

        let colspan = table.attribute("td", "colspan").expect("colspan");
        assert_eq!(colspan.ty, SpecType::Named(AttributeType::ColSpan));

        let tabindex = table.attribute("div", "TabIndex").expect("tabindex");
        assert_eq!(tabindex.ty, SpecType::Named(AttributeType::TabIndex));

        assert!(table.attribute("div", "colspan").is_none());
        assert!(table.attribute("unknown", "id").is_none());
    }

    #[test]
    fn test_spec_type_decoding() {
        let json = r#"{
            "global": [{ "name": "dir", "type": { "enum": ["ltr", "rtl", "auto"] } }],
            "elements": {
                "x": { "attributes": [{ "name": "a", "type": "SVGPathData" }] },
                "y": { "globalAttrs": false }
            }
        }"#;
        let table = SpecTable::from_json(json).expect("parse");

        assert_eq!(
            table.attribute("x", "dir").map(|a| &a.ty),
            Some(&SpecType::enumeration(["ltr", "rtl", "auto"]))
        );
        assert_eq!(
            table.attribute("x", "a").map(|a| &a.ty),
            Some(&SpecType::Named(AttributeType::SvgPathData))
        );
        assert!(table.attribute("y", "dir").is_none());
    }

    #[test]
    fn test_enum_members_are_lower_cased() {
        let ty: SpecType = serde_json::from_str(r#"{ "enum": ["LTR", "Rtl"] }"#).expect("parse");
        assert_eq!(ty, SpecType::enumeration(["ltr", "rtl"]));
        assert_eq!(SpecType::enumeration(["Auto"]), SpecType::enumeration(["auto"]));
    }

    #[test]
    fn test_builder_extends_table() {
        let table = SpecTable::new()
            .with_global(AttributeSpec::new("hidden", AttributeType::Boolean))
            .with_element(
                "x-card",
                ElementSpec {
                    attributes: vec![AttributeSpec::new("size", AttributeType::Uint)],
                    global_attrs: true,
                },
            )
            .with_element(
                "x-raw",
                ElementSpec {
                    attributes: Vec::new(),
                    global_attrs: false,
                },
            );

        assert!(table.has_element("X-Card"));
        assert_eq!(
            table.attribute("x-card", "size").map(|a| &a.ty),
            Some(&SpecType::Named(AttributeType::Uint))
        );
        assert!(table.attribute("x-card", "hidden").is_some());
        assert!(table.attribute("x-raw", "hidden").is_none());
    }

    #[test]
    fn test_unknown_type_name_is_kept() {
        let spec: AttributeSpec =
            serde_json::from_str(r#"{ "name": "x", "type": "SomethingNew" }"#).expect("parse");
        assert_eq!(spec.ty, SpecType::Named(AttributeType::Unknown));
    }

    #[test]
    fn test_malformed_table() {
        assert!(matches!(
            SpecTable::from_json("{ \"global\": 3 }"),
            Err(SpecError::Parse { .. })
        ));
    }
}
