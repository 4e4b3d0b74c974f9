//! Action Table
//!
//! Maps the logical action named by a request onto a directory method and
//! the response field that holds its elements.

use crate::error::{ProxyError, Result};

/// Directory method backing a logical action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    /// Logical action name as sent by callers
    pub action: &'static str,
    /// Response field holding the page's elements
    pub result_array_key: &'static str,
    /// Directory method to invoke
    pub method_name: &'static str,
}

/// Every action the proxy forwards.
pub const ACTIONS: &[ActionSpec] = &[
    ActionSpec {
        action: "DescribeAccount",
        result_array_key: "Account",
        method_name: "describeAccount",
    },
    ActionSpec {
        action: "DescribeOrganizationalUnit",
        result_array_key: "OrganizationalUnit",
        method_name: "describeOrganizationalUnit",
    },
    ActionSpec {
        action: "ListAccounts",
        result_array_key: "Accounts",
        method_name: "listAccounts",
    },
    ActionSpec {
        action: "ListAccountsForParent",
        result_array_key: "Accounts",
        method_name: "listAccountsForParent",
    },
    ActionSpec {
        action: "ListChildren",
        result_array_key: "Children",
        method_name: "listChildren",
    },
    ActionSpec {
        action: "ListOrganizationalUnitsForParent",
        result_array_key: "OrganizationalUnits",
        method_name: "listOrganizationalUnitsForParent",
    },
    ActionSpec {
        action: "ListParents",
        result_array_key: "Parents",
        method_name: "listParents",
    },
    ActionSpec {
        action: "ListRoots",
        result_array_key: "Roots",
        method_name: "listRoots",
    },
    ActionSpec {
        action: "ListTagsForResource",
        result_array_key: "Tags",
        method_name: "listTagsForResource",
    },
];

/// Looks up `action`, failing with [`ProxyError::UnsupportedAction`] if it
/// is not in the table. Names are matched exactly.
pub fn resolve_action(action: &str) -> Result<&'static ActionSpec> {
    ACTIONS
        .iter()
        .find(|spec| spec.action == action)
        .ok_or_else(|| ProxyError::UnsupportedAction(action.to_string()))
}
