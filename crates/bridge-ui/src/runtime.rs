//! The embedded browser runtime, delivered verbatim as part of every
//! compiled HTML document (§4.6).
//!
//! Specified by contract, not by a component to re-implement: strict mode,
//! no HTML-string sinks, no dynamic code evaluation, an attribute gate, SVG
//! allowlists, a pinned chart CDN + subresource-integrity hash, and
//! trust-on-first-use host origin pinning.

/// The runtime script, embedded verbatim into every compiled document.
pub const RUNTIME_SCRIPT: &str = include_str!("../assets/runtime.js");

/// The single allowlisted chart CDN origin, referenced by the compiler's
/// `script-src` directive and matched against the runtime's pinned URL.
pub const CHART_CDN_SRC: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.4/dist/chart.umd.min.js";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_never_uses_inner_html_sinks() {
        for sink in ["innerHTML", "outerHTML", "document.write"] {
            assert!(
                !RUNTIME_SCRIPT.contains(sink),
                "runtime must not reference {sink}"
            );
        }
    }

    #[test]
    fn runtime_never_calls_eval_or_function_constructor() {
        assert!(!RUNTIME_SCRIPT.contains("eval("));
        assert!(!RUNTIME_SCRIPT.contains("new Function"));
    }

    #[test]
    fn runtime_runs_in_strict_mode() {
        assert!(RUNTIME_SCRIPT.trim_start().starts_with("\"use strict\""));
    }

    #[test]
    fn runtime_references_exactly_one_sri_hash() {
        let occurrences = RUNTIME_SCRIPT.matches("sha384-").count();
        assert_eq!(occurrences, 1, "exactly one pinned SRI hash is permitted");
    }

    #[test]
    fn cdn_src_matches_the_url_pinned_in_the_runtime() {
        assert!(RUNTIME_SCRIPT.contains(CHART_CDN_SRC));
    }

    #[test]
    fn dangerous_svg_elements_are_absent_from_the_allowlist() {
        let allowlist_line = RUNTIME_SCRIPT
            .lines()
            .find(|line| line.contains("SVG_ELEMENT_ALLOWLIST"))
            .expect("runtime declares an SVG element allowlist");
        for element in ["\"script\"", "\"foreignObject\"", "\"use\"", "\"image\"", "\"animate\"", "\"set\""] {
            assert!(
                !allowlist_line.contains(element),
                "SVG element allowlist must not contain {element}"
            );
        }
    }
}
