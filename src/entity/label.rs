use crate::xml::{ToNode, XmlNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPrintMethod {
    Gif,
    Epl,
    Zpl,
    Spl,
    Starpl,
}

impl LabelPrintMethod {
    pub fn code(&self) -> &'static str {
        match self {
            LabelPrintMethod::Gif => "GIF",
            LabelPrintMethod::Epl => "EPL",
            LabelPrintMethod::Zpl => "ZPL",
            LabelPrintMethod::Spl => "SPL",
            LabelPrintMethod::Starpl => "STARPL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Gif,
    Png,
    Epl,
    Zpl,
    Spl,
    Html,
    Pdf,
}

impl ImageFormat {
    pub fn code(&self) -> &'static str {
        match self {
            ImageFormat::Gif => "GIF",
            ImageFormat::Png => "PNG",
            ImageFormat::Epl => "EPL",
            ImageFormat::Zpl => "ZPL",
            ImageFormat::Spl => "SPL",
            ImageFormat::Html => "HTML",
            ImageFormat::Pdf => "PDF",
        }
    }
}

fn code_node(name: &str, code: &str) -> XmlNode {
    let mut node = XmlNode::new(name);
    node.push_text("Code", code);
    node
}

// Label stock in inches, only used by thermal print methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelStockSize {
    pub height: u32,
    pub width: u32,
}

impl ToNode for LabelStockSize {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("LabelStockSize");
        node.push_text("Height", self.height.to_string())
            .push_text("Width", self.width.to_string());
        node
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpecification {
    pub print_method: LabelPrintMethod,
    pub http_user_agent: Option<String>,
    pub stock_size: Option<LabelStockSize>,
    pub image_format: Option<ImageFormat>,
}

impl LabelSpecification {
    pub fn new(print_method: LabelPrintMethod) -> Self {
        Self {
            print_method,
            http_user_agent: None,
            stock_size: None,
            image_format: None,
        }
    }
}

impl ToNode for LabelSpecification {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("LabelSpecification");
        node.push(code_node("LabelPrintMethod", self.print_method.code()))
            .push_opt_text("HTTPUserAgent", self.http_user_agent.as_deref())
            .push_opt(self.stock_size.as_ref());
        if let Some(format) = self.image_format {
            node.push(code_node("LabelImageFormat", format.code()));
        }
        node
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptSpecification {
    pub image_format: ImageFormat,
    pub description: Option<String>,
}

impl ReceiptSpecification {
    pub fn new(image_format: ImageFormat) -> Self {
        Self {
            image_format,
            description: None,
        }
    }
}

impl ToNode for ReceiptSpecification {
    fn to_node(&self) -> XmlNode {
        let mut format = code_node("ImageFormat", self.image_format.code());
        format.push_opt_text("Description", self.description.as_deref());
        let mut node = XmlNode::new("ReceiptSpecification");
        node.push(format);
        node
    }
}

// Label format requested when recovering labels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelRecoverySpecification {
    pub http_user_agent: Option<String>,
    pub image_format: Option<ImageFormat>,
}

impl LabelRecoverySpecification {
    pub fn is_empty(&self) -> bool {
        self.http_user_agent.is_none() && self.image_format.is_none()
    }
}

impl ToNode for LabelRecoverySpecification {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("LabelSpecification");
        node.push_opt_text("HTTPUserAgent", self.http_user_agent.as_deref());
        if let Some(format) = self.image_format {
            node.push(code_node("LabelImageFormat", format.code()));
        }
        node
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelDelivery {
    /// Ask for a link to the label instead of the image itself.
    pub label_link: bool,
}

impl ToNode for LabelDelivery {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("LabelDelivery");
        node.push_flag("LabelLinkIndicator", self.label_link);
        node
    }
}

pub const DEFAULT_LANGUAGE: &str = "eng";
pub const DEFAULT_DIALECT: &str = "US";
const TRANSLATE_CODE: &str = "01";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translate {
    pub language: Option<String>,
    pub dialect: Option<String>,
}

impl Translate {
    pub fn new(language: impl Into<String>, dialect: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            dialect: Some(dialect.into()),
        }
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn dialect(&self) -> &str {
        self.dialect.as_deref().unwrap_or(DEFAULT_DIALECT)
    }
}

impl ToNode for Translate {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("Translate");
        node.push_text("LanguageCode", self.language())
            .push_text("DialectCode", self.dialect())
            .push_text("Code", TRANSLATE_CODE);
        node
    }
}
