//! Decoder for the Directory Server ACI text syntax.
//!
//! An ACI is a run of target clauses followed by the version body:
//!
//! ```text
//! (targetattr = "cn || sn")(target = "ldap:///cn=*,dc=example")(version 3.0;acl "name";allow (read,write) groupdn = "ldap:///cn=admins,dc=example";)
//! ```
//!
//! Target values are quoted and may contain parentheses (filters do), so the
//! clause run is scanned by hand. The version body is matched with a regex;
//! the quoted bind expression may itself contain `;`.

use std::sync::LazyLock;

use regex::Regex;

use crate::aci::{Aci, Action};
use crate::error::{Error, Result};
use crate::permission::Permission;
use crate::rule::{BindRule, Operator, TargetRule};

#[allow(clippy::expect_used)]
static ACI_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\(\s*version\s+3\.0\s*;\s*acl\s+"([^"]*)"\s*;\s*((?:[^;"]|"[^"]*")*);\s*\)\s*$"#,
    )
        .expect("ACI body pattern is valid")
});

#[allow(clippy::expect_used)]
static PERMISSIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\w+)\s*\(([^)]*)\)\s*(.*)$").expect("permission pattern is valid")
});

/// Decode one ACI.
pub(crate) fn parse_aci(text: &str) -> Result<Aci> {
    let mut rest = text.trim();
    let mut target = TargetRule::default();

    loop {
        rest = rest.trim_start();
        let Some(inner) = rest.strip_prefix('(') else {
            return Err(Error::Malformed(format!(
                "expected '(' before version body: {text}"
            )));
        };
        if inner.trim_start().starts_with("version") {
            break;
        }
        rest = parse_clause(rest, &mut target)?;
    }

    let body = ACI_BODY
        .captures(rest)
        .ok_or_else(|| Error::Malformed(format!("unable to match version and bind rule: {text}")))?;
    let name = body[1].to_string();

    let grant = PERMISSIONS
        .captures(&body[2])
        .ok_or_else(|| Error::Malformed(format!("permissions match failed: {text}")))?;
    let action: Action = grant[1].parse()?;
    let permissions = grant[2]
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::parse::<Permission>)
        .collect::<Result<Vec<_>>>()?;
    let bind_rule = BindRule::parse(&grant[3])?;

    let mut aci = Aci::new(name);
    aci.action = action;
    aci.set_permissions(permissions);
    aci.bind_rule = bind_rule;
    aci.target = target;
    Ok(aci)
}

/// Parse one `(keyword op value)` clause at the head of `input` and return
/// what follows it.
fn parse_clause<'a>(input: &'a str, target: &mut TargetRule) -> Result<&'a str> {
    let body = input.strip_prefix('(').unwrap_or(input).trim_start();

    let keyword_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(body.len());
    if keyword_len == 0 {
        return Err(Error::Target(format!("missing keyword in {input}")));
    }
    let keyword = &body[..keyword_len];
    let after = body[keyword_len..].trim_start();

    let (operator, after) = if let Some(r) = after.strip_prefix("!=") {
        (Operator::NotEqual, r)
    } else if let Some(r) = after.strip_prefix('=') {
        (Operator::Equal, r)
    } else {
        return Err(Error::Target(format!("no operator after '{keyword}'")));
    };
    let after = after.trim_start();

    let (value, after) = if let Some(quoted) = after.strip_prefix('"') {
        let end = quoted
            .find('"')
            .ok_or_else(|| Error::Target(format!("unterminated value for '{keyword}'")))?;
        (&quoted[..end], &quoted[end + 1..])
    } else {
        let end = after
            .find(|c: char| c == ')' || c.is_whitespace())
            .unwrap_or(after.len());
        (&after[..end], &after[end..])
    };

    let after = after
        .trim_start()
        .strip_prefix(')')
        .ok_or_else(|| Error::Target(format!("no end parenthesis for '{keyword}'")))?;

    target.insert(keyword, operator, value.trim().to_string());
    Ok(after)
}
