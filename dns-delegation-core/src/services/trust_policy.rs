//! Trust policy documents for the delegation role
//!
//! IAM hands the assume-role policy back percent-encoded; [`parse_trusted_accounts`]
//! decodes it first so parsing always sees canonical JSON.

use std::borrow::Cow;
use std::collections::BTreeSet;

use serde_json::{Value, json};

use crate::types::is_valid_account_id;

/// Build an assume-role policy trusting the root principal of every account.
#[must_use]
pub fn build_trust_policy(accounts: &BTreeSet<String>) -> String {
    let principals: Vec<String> = accounts
        .iter()
        .map(|id| format!("arn:aws:iam::{id}:root"))
        .collect();

    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Principal": { "AWS": principals },
            "Action": "sts:AssumeRole"
        }]
    })
    .to_string()
}

/// Account IDs trusted by a policy document.
///
/// Malformed documents yield an empty set.
#[must_use]
pub fn parse_trusted_accounts(document: &str) -> BTreeSet<String> {
    let document = decode_document(document);
    let Ok(policy) = serde_json::from_str::<Value>(&document) else {
        log::debug!("Trust policy is not valid JSON, treating as no trusted accounts");
        return BTreeSet::new();
    };

    let statements = match &policy["Statement"] {
        Value::Array(list) => list.iter().collect::<Vec<_>>(),
        obj @ Value::Object(_) => vec![obj],
        _ => Vec::new(),
    };

    let mut accounts = BTreeSet::new();
    for statement in statements {
        let principals: Vec<&str> = match &statement["Principal"]["AWS"] {
            Value::String(one) => vec![one.as_str()],
            Value::Array(many) => many.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        };
        accounts.extend(principals.into_iter().filter_map(account_id_from_principal));
    }
    accounts
}

/// Account ID of a principal: the 5th `:` field of an ARN, or a bare 12-digit ID.
#[must_use]
pub fn account_id_from_principal(principal: &str) -> Option<String> {
    let principal = principal.trim();
    if is_valid_account_id(principal) {
        return Some(principal.to_string());
    }
    principal
        .split(':')
        .nth(4)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn decode_document(document: &str) -> Cow<'_, str> {
    if (document.contains("%7B") || document.contains("%22"))
        && let Ok(decoded) = urlencoding::decode(document)
    {
        return decoded;
    }
    Cow::Borrowed(document)
}
