use crate::xml::{ToNode, XmlNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    code: String,
    description: Option<String>,
}

impl Service {
    pub const NEXT_DAY_AIR: &'static str = "01";
    pub const SECOND_DAY_AIR: &'static str = "02";
    pub const GROUND: &'static str = "03";
    pub const WORLDWIDE_EXPRESS: &'static str = "07";
    pub const WORLDWIDE_EXPEDITED: &'static str = "08";
    pub const STANDARD: &'static str = "11";
    pub const THREE_DAY_SELECT: &'static str = "12";
    pub const NEXT_DAY_AIR_SAVER: &'static str = "13";
    pub const NEXT_DAY_AIR_EARLY: &'static str = "14";
    pub const WORLDWIDE_EXPRESS_PLUS: &'static str = "54";
    pub const SECOND_DAY_AIR_AM: &'static str = "59";
    pub const SAVER: &'static str = "65";

    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl ToNode for Service {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("Service");
        node.push_text("Code", self.code.as_str())
            .push_opt_text("Description", self.description.as_deref());
        node
    }
}

// Return label type: print and mail, one attempt, three attempts, electronic, print
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnService {
    code: String,
}

impl ReturnService {
    pub const PRINT_AND_MAIL: &'static str = "2";
    pub const RETURN_SERVICE_1_ATTEMPT: &'static str = "3";
    pub const RETURN_SERVICE_3_ATTEMPT: &'static str = "5";
    pub const ELECTRONIC_RETURN_LABEL: &'static str = "8";
    pub const PRINT_RETURN_LABEL: &'static str = "9";

    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl ToNode for ReturnService {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("ReturnService");
        node.push_text("Code", self.code.as_str());
        node
    }
}
