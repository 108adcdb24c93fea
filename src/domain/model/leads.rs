//! Lead-capture submissions: contact requests, quote requests and "ask us anything" queries.

use super::{require, trimmed, Document, ValidationError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ContactDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl From<ContactDraft> for Contact {
    fn from(draft: ContactDraft) -> Self {
        Self {
            name: trimmed(draft.name),
            email: trimmed(draft.email),
            phone: trimmed(draft.phone),
            message: trimmed(draft.message),
        }
    }
}

impl Document for Contact {
    const COLLECTION: &'static str = "contacts";
    const LABEL: &'static str = "Contact";

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("phone", &self.phone)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Free-text product label, not a reference.
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub quote_message: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub product: Option<String>,
    pub quote_message: Option<String>,
}

impl From<QuoteDraft> for Quote {
    fn from(draft: QuoteDraft) -> Self {
        Self {
            name: trimmed(draft.name),
            email: trimmed(draft.email),
            phone: trimmed(draft.phone),
            product: trimmed(draft.product),
            quote_message: trimmed(draft.quote_message),
        }
    }
}

impl Document for Quote {
    const COLLECTION: &'static str = "quotes";
    const LABEL: &'static str = "Quote";

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("email", &self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskQuery {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub query: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AskQueryDraft {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub query: Option<String>,
}

impl From<AskQueryDraft> for AskQuery {
    fn from(draft: AskQueryDraft) -> Self {
        Self {
            name: trimmed(draft.name),
            mobile: trimmed(draft.mobile),
            email: trimmed(draft.email),
            query: trimmed(draft.query),
        }
    }
}

impl Document for AskQuery {
    const COLLECTION: &'static str = "ask_queries";
    const LABEL: &'static str = "Query";

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("mobile", &self.mobile)?;
        require("email", &self.email)?;
        require("query", &self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_without_phone_is_invalid() {
        let contact = Contact::from(ContactDraft {
            name: Some("A".to_string()),
            email: Some("a@x.com".to_string()),
            phone: Some("   ".to_string()),
            message: None,
        });
        assert_eq!(contact.validate(), Err(ValidationError::MissingField("phone")));
    }

    #[test]
    fn quote_fields_use_camel_case() {
        let draft: QuoteDraft = serde_json::from_value(serde_json::json!({
            "name": "B",
            "email": "b@x.com",
            "quoteMessage": "Need 200 units"
        }))
        .unwrap();
        let quote = Quote::from(draft);
        assert_eq!(quote.quote_message, "Need 200 units");
        assert!(quote.validate().is_ok());

        let encoded = serde_json::to_value(&quote).unwrap();
        assert_eq!(encoded["quoteMessage"], "Need 200 units");
    }

    #[test]
    fn every_ask_query_field_is_required() {
        let query = AskQuery::from(AskQueryDraft {
            name: Some("C".to_string()),
            mobile: Some("9999".to_string()),
            email: Some("c@x.com".to_string()),
            query: None,
        });
        assert_eq!(query.validate(), Err(ValidationError::MissingField("query")));
    }
}
