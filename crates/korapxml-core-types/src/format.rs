//! KorAP-XML format constants

/// Default XML namespace of every KorAP-XML file
pub const NS_URI: &str = "http://ids-mannheim.de/ns/KorAP";

/// Format version written into the `version` attribute of layer files
pub const KORAP_VERSION: &str = "KorAP-0.4";

/// Raw text file inside a text directory
pub const DATA_FILE: &str = "data.xml";

/// Foundry and layer of the mandatory token scaffold
pub const BASE_FOUNDRY: &str = "base";
pub const TOKEN_LAYER: &str = "token";

/// File extension of every layer file
pub const XML_EXTENSION: &str = "xml";
