//! Serializer feature table and per-instance feature values
//!
//! Features share one identifier space with the parser side of the toolkit.
//! Every identifier carries a fixed value type (integer or string) and the
//! set of roles it applies to; a serializer only accepts identifiers tagged
//! with [`FeatureArea::SERIALIZER`].

use crate::error::{SerializeError, SerializeResult};
use oxiri::Iri;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Namespace for feature URIs
pub const FEATURE_URI_PREFIX: &str = "https://w3id.org/oxirs/feature/";

/// Feature identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Scanning,
    AssumeIsRdf,
    AllowNonNsAttributes,
    AllowOtherParsetypes,
    AllowBagId,
    AllowRdfTypeRdfList,
    NormalizeLanguage,
    NonNfcFatal,
    WarnOtherParsetypes,
    CheckRdfId,
    RelativeUris,
    StartUri,
    WriterAutoIndent,
    WriterAutoEmpty,
    WriterIndentWidth,
    WriterXmlVersion,
    WriterXmlDeclaration,
    NoNet,
    ResourceBorder,
    LiteralBorder,
    BnodeBorder,
    ResourceFill,
    LiteralFill,
    BnodeFill,
    HtmlTagSoup,
}

/// Value type of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureType {
    Integer,
    String,
}

/// Roles a feature applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureArea(u8);

impl FeatureArea {
    pub const PARSER: Self = Self(1);
    pub const SERIALIZER: Self = Self(2);
    pub const XML_WRITER: Self = Self(4);

    const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether every role in `other` is present
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Default value of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureDefault {
    Integer(i32),
    Unset,
}

/// Metadata row of the feature table
#[derive(Debug)]
pub struct FeatureInfo {
    pub feature: Feature,
    /// Short name used in configuration files
    pub name: &'static str,
    pub label: &'static str,
    pub value_type: FeatureType,
    pub area: FeatureArea,
    pub default: FeatureDefault,
    /// Accepts or rejects a non-negative integer; rejected values are ignored
    pub validator: Option<fn(i32) -> bool>,
    /// Readers see the value as 0 or 1
    pub flag: bool,
}

impl FeatureInfo {
    /// Full URI identifying this feature
    pub fn uri(&self) -> String {
        format!("{FEATURE_URI_PREFIX}{}", self.name)
    }

    /// Whether serializers accept this feature
    pub fn is_serializer_feature(&self) -> bool {
        self.area.contains(FeatureArea::SERIALIZER)
    }
}

fn valid_xml_version(value: i32) -> bool {
    value == 10 || value == 11
}

const PARSER: FeatureArea = FeatureArea::PARSER;
const SERIALIZER: FeatureArea = FeatureArea::SERIALIZER;
const XML_WRITER: FeatureArea = FeatureArea::XML_WRITER;

macro_rules! feature_row {
    ($feature:ident, $name:literal, $label:literal, Integer, $area:expr, $default:expr $(,)?) => {
        FeatureInfo {
            feature: Feature::$feature,
            name: $name,
            label: $label,
            value_type: FeatureType::Integer,
            area: $area,
            default: FeatureDefault::Integer($default),
            validator: None,
            flag: false,
        }
    };
    ($feature:ident, $name:literal, $label:literal, String, $area:expr $(,)?) => {
        FeatureInfo {
            feature: Feature::$feature,
            name: $name,
            label: $label,
            value_type: FeatureType::String,
            area: $area,
            default: FeatureDefault::Unset,
            validator: None,
            flag: false,
        }
    };
}

/// The shared feature table, in identifier order
pub static FEATURES: &[FeatureInfo] = &[
    feature_row!(Scanning, "scanForRDF", "Scan for rdf:RDF in XML content", Integer, PARSER, 0),
    feature_row!(
        AssumeIsRdf,
        "assumeIsRDF",
        "Assume content is RDF/XML, don't require rdf:RDF",
        Integer,
        PARSER,
        0,
    ),
    feature_row!(
        AllowNonNsAttributes,
        "allowNonNsAttributes",
        "Allow bare 'name' rather than namespaced 'rdf:name' for rdf:aboutEach, rdf:ID, rdf:about, rdf:bagID, rdf:datatype, rdf:resource and rdf:parseType",
        Integer,
        PARSER,
        1,
    ),
    feature_row!(
        AllowOtherParsetypes,
        "allowOtherParsetypes",
        "Allow user-defined rdf:parseType values",
        Integer,
        PARSER,
        1,
    ),
    feature_row!(AllowBagId, "allowBagID", "Allow rdf:bagID", Integer, PARSER, 1),
    feature_row!(
        AllowRdfTypeRdfList,
        "allowRDFtypeRDFlist",
        "Generate the collection rdf:type rdf:List triple",
        Integer,
        PARSER,
        0,
    ),
    feature_row!(
        NormalizeLanguage,
        "normalizeLanguage",
        "Normalize xml:lang values to lowercase",
        Integer,
        PARSER,
        1,
    ),
    feature_row!(
        NonNfcFatal,
        "nonNFCfatal",
        "Make non-NFC literals cause a fatal error",
        Integer,
        PARSER,
        0,
    ),
    feature_row!(
        WarnOtherParsetypes,
        "warnOtherParseTypes",
        "Warn about unknown rdf:parseType values",
        Integer,
        PARSER,
        1,
    ),
    feature_row!(
        CheckRdfId,
        "checkRdfID",
        "Check rdf:ID values for duplicates",
        Integer,
        PARSER,
        1,
    ),
    FeatureInfo {
        feature: Feature::RelativeUris,
        name: "relativeURIs",
        label: "Write relative URIs wherever possible in serializing",
        value_type: FeatureType::Integer,
        area: SERIALIZER,
        default: FeatureDefault::Integer(1),
        validator: None,
        flag: true,
    },
    feature_row!(StartUri, "startURI", "Start URI for serializing to use", String, SERIALIZER),
    feature_row!(
        WriterAutoIndent,
        "writerAutoIndent",
        "Automatically indent elements",
        Integer,
        XML_WRITER,
        1,
    ),
    feature_row!(
        WriterAutoEmpty,
        "writerAutoEmpty",
        "Automatically detect and abbreviate empty elements",
        Integer,
        XML_WRITER,
        1,
    ),
    feature_row!(
        WriterIndentWidth,
        "writerIndentWidth",
        "Number of spaces to indent",
        Integer,
        XML_WRITER,
        2,
    ),
    FeatureInfo {
        feature: Feature::WriterXmlVersion,
        name: "writerXMLVersion",
        label: "XML version to write",
        value_type: FeatureType::Integer,
        area: SERIALIZER.union(XML_WRITER),
        default: FeatureDefault::Integer(10),
        validator: Some(valid_xml_version),
        flag: false,
    },
    FeatureInfo {
        feature: Feature::WriterXmlDeclaration,
        name: "writerXMLDeclaration",
        label: "Write XML declaration",
        value_type: FeatureType::Integer,
        area: SERIALIZER.union(XML_WRITER),
        default: FeatureDefault::Integer(1),
        validator: None,
        flag: true,
    },
    feature_row!(NoNet, "noNet", "Deny network requests", Integer, PARSER, 0),
    feature_row!(
        ResourceBorder,
        "resourceBorder",
        "DOT serializer resource border color",
        String,
        SERIALIZER,
    ),
    feature_row!(
        LiteralBorder,
        "literalBorder",
        "DOT serializer literal border color",
        String,
        SERIALIZER,
    ),
    feature_row!(
        BnodeBorder,
        "bnodeBorder",
        "DOT serializer blank node border color",
        String,
        SERIALIZER,
    ),
    feature_row!(
        ResourceFill,
        "resourceFill",
        "DOT serializer resource fill color",
        String,
        SERIALIZER,
    ),
    feature_row!(
        LiteralFill,
        "literalFill",
        "DOT serializer literal fill color",
        String,
        SERIALIZER,
    ),
    feature_row!(
        BnodeFill,
        "bnodeFill",
        "DOT serializer blank node fill color",
        String,
        SERIALIZER,
    ),
    feature_row!(
        HtmlTagSoup,
        "htmlTagSoup",
        "Use a lax HTML parser if an XML parser fails",
        Integer,
        PARSER,
        0,
    ),
];

impl Feature {
    /// Metadata row for this identifier
    pub fn info(self) -> &'static FeatureInfo {
        // Rows are stored in declaration order
        &FEATURES[self as usize]
    }

    /// Short name of this feature
    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn value_type(self) -> FeatureType {
        self.info().value_type
    }

    /// Look up a feature by short name or full URI
    pub fn from_name(name: &str) -> Option<Self> {
        let short = name.strip_prefix(FEATURE_URI_PREFIX).unwrap_or(name);
        FEATURES
            .iter()
            .find(|info| info.name == short)
            .map(|info| info.feature)
    }

    fn serializer_info(self) -> Option<&'static FeatureInfo> {
        Some(self.info()).filter(|info| info.is_serializer_feature())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serializer feature at `index`, counting only serializer features
pub fn enumerate(index: usize) -> Option<&'static FeatureInfo> {
    serializer_features().nth(index)
}

/// All features a serializer accepts, in table order
pub fn serializer_features() -> impl Iterator<Item = &'static FeatureInfo> {
    FEATURES.iter().filter(|info| info.is_serializer_feature())
}

/// A stored feature value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureValue {
    Integer(i32),
    String(String),
}

/// Feature values held by one serializer instance
#[derive(Debug, Clone)]
pub struct FeatureValues {
    values: HashMap<Feature, FeatureValue>,
}

impl Default for FeatureValues {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureValues {
    /// Values with every serializer default applied
    pub fn new() -> Self {
        let values = serializer_features()
            .filter_map(|info| match info.default {
                FeatureDefault::Integer(value) => {
                    Some((info.feature, FeatureValue::Integer(value)))
                }
                FeatureDefault::Unset => None,
            })
            .collect();
        Self { values }
    }

    /// Set an integer-valued feature.
    ///
    /// Negative values are always rejected. A value refused by the feature's
    /// validator (for example an XML version other than 10 or 11) leaves the
    /// stored value untouched and is not reported as an error.
    pub fn set_int(&mut self, feature: Feature, value: i32) -> SerializeResult<()> {
        if value < 0 {
            return Err(SerializeError::invalid_feature_value(
                feature,
                format!("{value} is negative"),
            ));
        }

        let info = feature
            .serializer_info()
            .filter(|info| info.value_type == FeatureType::Integer)
            .ok_or_else(|| SerializeError::UnsupportedFeature(feature.name().to_string()))?;

        if let Some(validate) = info.validator {
            if !validate(value) {
                debug!(feature = info.name, value, "ignoring out-of-range feature value");
                return Ok(());
            }
        }

        self.values.insert(feature, FeatureValue::Integer(value));
        Ok(())
    }

    /// Set a feature from a string.
    ///
    /// Integer-typed features parse `value` and go through [`Self::set_int`].
    pub fn set_string(&mut self, feature: Feature, value: &str) -> SerializeResult<()> {
        let info = feature
            .serializer_info()
            .ok_or_else(|| SerializeError::UnsupportedFeature(feature.name().to_string()))?;

        match info.value_type {
            FeatureType::Integer => {
                let parsed = value.trim().parse::<i32>().map_err(|e| {
                    SerializeError::invalid_feature_value(feature, format!("'{value}': {e}"))
                })?;
                self.set_int(feature, parsed)
            }
            FeatureType::String => {
                if feature == Feature::StartUri {
                    Iri::parse(value).map_err(|e| SerializeError::invalid_iri(value, e))?;
                }
                self.values
                    .insert(feature, FeatureValue::String(value.to_string()));
                Ok(())
            }
        }
    }

    /// Integer value of a feature, or -1 if it is not an integer serializer feature
    pub fn get_int(&self, feature: Feature) -> i32 {
        let Some(info) = feature
            .serializer_info()
            .filter(|info| info.value_type == FeatureType::Integer)
        else {
            return -1;
        };

        match self.values.get(&feature) {
            Some(FeatureValue::Integer(value)) if info.flag => i32::from(*value != 0),
            Some(FeatureValue::Integer(value)) => *value,
            _ => -1,
        }
    }

    /// String value of a feature, if it is a string serializer feature that was set
    pub fn get_string(&self, feature: Feature) -> Option<&str> {
        feature
            .serializer_info()
            .filter(|info| info.value_type == FeatureType::String)?;
        match self.values.get(&feature) {
            Some(FeatureValue::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn relative_uris(&self) -> bool {
        self.get_int(Feature::RelativeUris) == 1
    }

    /// XML version as written in a declaration (`"1.0"` or `"1.1"`)
    pub fn xml_version(&self) -> &'static str {
        if self.get_int(Feature::WriterXmlVersion) == 11 {
            "1.1"
        } else {
            "1.0"
        }
    }

    pub fn write_xml_declaration(&self) -> bool {
        self.get_int(Feature::WriterXmlDeclaration) == 1
    }

    pub fn start_uri(&self) -> Option<&str> {
        self.get_string(Feature::StartUri)
    }

    /// One of the DOT border/fill colours
    pub fn style(&self, feature: Feature) -> Option<&str> {
        self.get_string(feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_identifiers() {
        for (index, info) in FEATURES.iter().enumerate() {
            assert_eq!(info.feature as usize, index, "row {} out of order", info.name);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Feature::from_name("relativeURIs"), Some(Feature::RelativeUris));
        assert_eq!(
            Feature::from_name("https://w3id.org/oxirs/feature/bnodeFill"),
            Some(Feature::BnodeFill)
        );
        assert_eq!(Feature::from_name("noSuchFeature"), None);
    }

    #[test]
    fn test_enumerate_serializer_features() {
        let names: Vec<_> = serializer_features().map(|info| info.name).collect();
        assert_eq!(
            names,
            vec![
                "relativeURIs",
                "startURI",
                "writerXMLVersion",
                "writerXMLDeclaration",
                "resourceBorder",
                "literalBorder",
                "bnodeBorder",
                "resourceFill",
                "literalFill",
                "bnodeFill",
            ]
        );
        assert_eq!(enumerate(0).map(|info| info.feature), Some(Feature::RelativeUris));
        assert!(enumerate(names.len()).is_none());
    }

    #[test]
    fn test_defaults() {
        let values = FeatureValues::new();
        assert_eq!(values.get_int(Feature::RelativeUris), 1);
        assert_eq!(values.get_int(Feature::WriterXmlVersion), 10);
        assert_eq!(values.get_int(Feature::WriterXmlDeclaration), 1);
        assert!(values.get_string(Feature::StartUri).is_none());
        assert!(values.get_string(Feature::ResourceFill).is_none());
    }

    #[test]
    fn test_flag_normalized_on_read() {
        let mut values = FeatureValues::new();
        values.set_int(Feature::RelativeUris, 7).unwrap();
        assert_eq!(values.get_int(Feature::RelativeUris), 1);
        values.set_int(Feature::RelativeUris, 0).unwrap();
        assert!(!values.relative_uris());
    }

    #[test]
    fn test_parser_feature_rejected() {
        let mut values = FeatureValues::new();
        assert!(matches!(
            values.set_int(Feature::Scanning, 1),
            Err(SerializeError::UnsupportedFeature(_))
        ));
        assert!(values.set_int(Feature::WriterIndentWidth, 4).is_err());
        assert_eq!(values.get_int(Feature::Scanning), -1);
    }

    #[test]
    fn test_string_feature_wrong_accessor() {
        let mut values = FeatureValues::new();
        assert!(values.set_int(Feature::BnodeBorder, 1).is_err());
        assert_eq!(values.get_int(Feature::BnodeBorder), -1);
        assert!(values.get_string(Feature::RelativeUris).is_none());
    }

    #[test]
    fn test_set_string_on_integer_feature() {
        let mut values = FeatureValues::new();
        values.set_string(Feature::WriterXmlVersion, "11").unwrap();
        assert_eq!(values.xml_version(), "1.1");
        assert!(values.set_string(Feature::WriterXmlVersion, "eleven").is_err());
        assert_eq!(values.get_int(Feature::WriterXmlVersion), 11);
    }

    #[test]
    fn test_start_uri_must_be_iri() {
        let mut values = FeatureValues::new();
        values
            .set_string(Feature::StartUri, "http://example.org/start")
            .unwrap();
        assert_eq!(values.start_uri(), Some("http://example.org/start"));
        assert!(values.set_string(Feature::StartUri, "not an iri").is_err());
        assert_eq!(values.start_uri(), Some("http://example.org/start"));
    }
}
