//! Record extraction from decompressed CIL text.
//!
//! Compiled CIL is line-oriented s-expressions; only two statement shapes
//! matter for dependency tracking. Type declarations mark ownership:
//!
//! ```text
//! (type httpd_t)
//! ```
//!
//! and `cil_gen_require` attribute sets, emitted by the high-level language
//! compiler for every external symbol a module references, mark
//! requirements:
//!
//! ```text
//! (typeattributeset cil_gen_require sshd_t)
//! ```
//!
//! Everything else in the file is ignored.

use regex::Regex;
use std::sync::LazyLock;

use crate::graph::ModuleRecord;

static RE_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(type ([A-Za-z0-9_]+)\)").expect("type pattern"));

static RE_REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(typeattributeset cil_gen_require ([A-Za-z0-9_]+)\)").expect("require pattern")
});

/// Extract declared and required type names from one module's CIL content.
///
/// Lines matching neither pattern are skipped silently. CIL identifiers are
/// ASCII in practice, so the content is decoded lossily rather than
/// rejecting artifacts with stray bytes.
pub fn extract_record(name: &str, family: &str, content: &[u8]) -> ModuleRecord {
    let text = String::from_utf8_lossy(content);
    let mut declared_types = Vec::new();
    let mut required_types = Vec::new();

    for line in text.lines() {
        if let Some(captures) = RE_TYPE.captures(line) {
            declared_types.push(captures[1].to_string());
        } else if let Some(captures) = RE_REQUIRE.captures(line) {
            required_types.push(captures[1].to_string());
        }
    }

    ModuleRecord::new(name, family, declared_types, required_types)
}
