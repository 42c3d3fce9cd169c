//! Declarative UI spec validation and HTML compilation (§4.5, §6.3).

use serde_json::Value;

use crate::catalog::ComponentKind;
use crate::error::{CompileError, CompileResult};
use crate::runtime::{CHART_CDN_SRC, RUNTIME_SCRIPT};
use crate::spec::{UiComponent, UiSpec};

/// Maximum total component count across the whole tree.
pub const MAX_COMPONENTS: usize = 50;
/// Maximum container-nesting depth. The root array itself is depth 0; each
/// level of `children` descended into adds one, regardless of whether the
/// bottom-most level holds a leaf or another container.
pub const MAX_DEPTH: usize = 10;
/// Maximum encoded spec size, in bytes.
pub const MAX_SPEC_BYTES: usize = 524_288;
/// Maximum encoded size of a single component's `props`, in bytes.
pub const MAX_PROPS_BYTES: usize = 65_536;

const DANGEROUS_KEYS: [&str; 3] = ["__proto__", "constructor", "prototype"];
const DANGEROUS_URL_PREFIXES: [&str; 3] = ["javascript:", "vbscript:", "data:text/html"];
const DANGEROUS_CSS_TOKENS: [&str; 3] = ["url(", "expression(", "@import"];

/// Validate a spec against the structural and security invariants. Returns
/// `Ok(())` if `compile` would succeed.
pub fn validate(spec: &UiSpec) -> CompileResult<()> {
    if spec.components.is_empty() {
        return Err(CompileError::EmptyComponents);
    }

    let encoded = serde_json::to_vec(spec).expect("UiSpec always serializes");
    if encoded.len() > MAX_SPEC_BYTES {
        return Err(CompileError::SpecTooLarge {
            size: encoded.len(),
            limit: MAX_SPEC_BYTES,
        });
    }

    let mut count = 0usize;
    let mut max_depth_seen = 0usize;
    validate_tree(&spec.components, 0, &mut count, &mut max_depth_seen)?;

    if count > MAX_COMPONENTS {
        return Err(CompileError::TooManyComponents {
            count,
            limit: MAX_COMPONENTS,
        });
    }
    if max_depth_seen > MAX_DEPTH {
        return Err(CompileError::TooDeep {
            depth: max_depth_seen,
            limit: MAX_DEPTH,
        });
    }

    Ok(())
}

fn validate_tree(
    components: &[UiComponent],
    depth: usize,
    count: &mut usize,
    max_depth_seen: &mut usize,
) -> CompileResult<()> {
    *max_depth_seen = (*max_depth_seen).max(depth);

    for component in components {
        *count += 1;

        if component.component_type.is_empty() {
            return Err(CompileError::EmptyComponentType);
        }
        let kind = ComponentKind::parse(&component.component_type).ok_or_else(|| {
            CompileError::UnknownComponentType {
                type_name: component.component_type.clone(),
            }
        })?;

        if let Some(props) = &component.props {
            let props_bytes = serde_json::to_vec(props).unwrap_or_default();
            if props_bytes.len() > MAX_PROPS_BYTES {
                return Err(CompileError::PropsTooLarge {
                    size: props_bytes.len(),
                    limit: MAX_PROPS_BYTES,
                });
            }
            check_value(props)?;
        }

        match &component.children {
            Some(children) if !children.is_empty() => {
                if !kind.allows_children() {
                    return Err(CompileError::ChildrenNotAllowed {
                        type_name: component.component_type.clone(),
                    });
                }
                validate_tree(children, depth + 1, count, max_depth_seen)?;
            }
            _ => {}
        }
    }

    Ok(())
}

/// Recursively walk a `props` value, rejecting dangerous keys/values.
/// Strings are lowercased before prefix/substring checks (§4.5).
fn check_value(value: &Value) -> CompileResult<()> {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                if DANGEROUS_KEYS.contains(&key.as_str()) {
                    return Err(CompileError::DangerousKey { key: key.clone() });
                }
                check_value(val)?;
            }
        }
        Value::Array(items) => {
            for item in items {
                check_value(item)?;
            }
        }
        Value::String(s) => {
            let lower = s.to_lowercase();
            if let Some(prefix) = DANGEROUS_URL_PREFIXES
                .iter()
                .find(|prefix| lower.starts_with(*prefix))
            {
                return Err(CompileError::DangerousValue {
                    detail: format!("string begins with forbidden scheme {prefix}"),
                });
            }
            if let Some(token) = DANGEROUS_CSS_TOKENS.iter().find(|token| lower.contains(*token)) {
                return Err(CompileError::DangerousValue {
                    detail: format!("string contains forbidden CSS token {token}"),
                });
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
    Ok(())
}

/// Escape `<`, `>`, `&` as their JSON unicode escapes so the encoded spec
/// can be embedded inside an HTML `<script>` block without risk of a
/// premature `</script>` close or HTML-context injection (§4.5).
fn escape_for_script_block(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            other => out.push(other),
        }
    }
    out
}

/// Validate then compile a spec into a single self-contained HTML document
/// (§6.3).
pub fn compile(spec: &UiSpec) -> CompileResult<String> {
    validate(spec)?;

    let spec_json = serde_json::to_string(spec).expect("validated spec always serializes");
    let escaped_json = escape_for_script_block(&spec_json);
    let title = html_escape(spec.display_title());

    let csp = format!(
        "default-src 'none'; script-src 'unsafe-inline' {CHART_CDN_SRC}; \
         style-src 'unsafe-inline'; img-src data:; connect-src 'none'; form-action 'none'"
    );

    Ok(format!(
        "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<meta http-equiv=\"Content-Security-Policy\" content=\"{csp}\">\n\
<title>{title}</title>\n\
</head>\n\
<body>\n\
<div id=\"app-root\"></div>\n\
<script type=\"application/json\" id=\"app-spec\">{escaped_json}</script>\n\
<script>{RUNTIME_SCRIPT}</script>\n\
</body>\n\
</html>\n"
    ))
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
