//! Builtin rule catalogs, one table per language plus a language-agnostic set.
//!
//! Severity and CWE assignments follow the published CWE entries for each
//! weakness class. Rules are matched line-wise; anchors are the literals the
//! prefilter keys on.

use vigil_core::types::IssueCategory::{Performance, Quality, Security};
use vigil_core::types::Severity::{Critical, High, Low, Medium};

use super::types::PatternDef;

/// TypeScript rules. JavaScript submissions share this table.
pub const TYPESCRIPT: &[PatternDef] = &[
    PatternDef {
        id: "ts-eval-usage",
        pattern: r"\beval\s*\(",
        anchor: Some("eval"),
        severity: High,
        category: Security,
        description: "Use of eval() allows execution of arbitrary code",
        suggestion: Some("Avoid eval(); parse input explicitly instead"),
        cwe_ids: &[95],
    },
    PatternDef {
        id: "ts-function-constructor",
        pattern: r"new\s+Function\s*\(",
        anchor: Some("Function"),
        severity: High,
        category: Security,
        description: "Function constructor builds code from strings",
        suggestion: Some("Replace dynamic Function construction with a static closure"),
        cwe_ids: &[95],
    },
    PatternDef {
        id: "ts-inner-html",
        pattern: r"\.innerHTML\s*=",
        anchor: Some("innerHTML"),
        severity: Medium,
        category: Security,
        description: "Unsanitized innerHTML assignment is an XSS sink",
        suggestion: Some("Use textContent or a sanitizer"),
        cwe_ids: &[79],
    },
    PatternDef {
        id: "ts-document-write",
        pattern: r"document\.write\s*\(|\.outerHTML\s*=",
        anchor: None,
        severity: High,
        category: Security,
        description: "document.write/outerHTML are XSS entry points",
        suggestion: Some("Build DOM nodes instead of writing markup strings"),
        cwe_ids: &[79],
    },
    PatternDef {
        id: "ts-sql-concat",
        pattern: r"(?:execute|query)\s*\(\s*[`\x22'].*(?:\$\{|\x22\s*\+|'\s*\+)",
        anchor: None,
        severity: High,
        category: Security,
        description: "SQL statement built by string concatenation",
        suggestion: Some("Use parameterized queries"),
        cwe_ids: &[89],
    },
    PatternDef {
        id: "ts-command-exec",
        pattern: r"\b(?:execSync|spawnSync)\s*\(|child_process",
        anchor: None,
        severity: High,
        category: Security,
        description: "Shell execution with potentially untrusted input",
        suggestion: Some("Validate arguments and avoid shell interpolation"),
        cwe_ids: &[78],
    },
    PatternDef {
        id: "ts-insecure-random",
        pattern: r"Math\.random\s*\(",
        anchor: Some("Math.random"),
        severity: Low,
        category: Security,
        description: "Math.random() is not cryptographically secure",
        suggestion: Some("Use crypto.getRandomValues() for security-sensitive values"),
        cwe_ids: &[338],
    },
    PatternDef {
        id: "ts-prototype-pollution",
        pattern: r"__proto__|Object\.prototype\s*\[",
        anchor: None,
        severity: Medium,
        category: Security,
        description: "Prototype pollution vector",
        suggestion: Some("Reject __proto__ keys when merging untrusted objects"),
        cwe_ids: &[1321],
    },
    PatternDef {
        id: "ts-unsafe-regex",
        pattern: r"new\s+RegExp\s*\(",
        anchor: Some("RegExp"),
        severity: Low,
        category: Security,
        description: "RegExp built from a runtime string may be attacker-controlled",
        suggestion: None,
        cwe_ids: &[1333],
    },
    PatternDef {
        id: "ts-console-log",
        pattern: r"console\.(?:log|debug|info)\s*\(",
        anchor: Some("console."),
        severity: Low,
        category: Quality,
        description: "Console output left in code",
        suggestion: Some("Remove or route through a logger"),
        cwe_ids: &[],
    },
    PatternDef {
        id: "ts-any-type",
        pattern: r":\s*any\b",
        anchor: Some("any"),
        severity: Low,
        category: Quality,
        description: "Explicit any defeats type checking",
        suggestion: Some("Narrow the type or use unknown"),
        cwe_ids: &[],
    },
    PatternDef {
        id: "ts-empty-catch",
        pattern: r"catch\s*(?:\([^)]*\))?\s*\{\s*\}",
        anchor: Some("catch"),
        severity: Medium,
        category: Quality,
        description: "Empty catch block swallows errors",
        suggestion: Some("Handle or rethrow the error"),
        cwe_ids: &[],
    },
    PatternDef {
        id: "ts-nested-callbacks",
        pattern: r"callback.*callback.*callback",
        anchor: Some("callback"),
        severity: Low,
        category: Quality,
        description: "Deeply nested callbacks",
        suggestion: Some("Flatten with async/await"),
        cwe_ids: &[],
    },
    PatternDef {
        id: "ts-sync-io",
        pattern: r"\b(?:readFileSync|writeFileSync|existsSync)\s*\(",
        anchor: Some("Sync"),
        severity: Medium,
        category: Performance,
        description: "Synchronous filesystem call blocks the event loop",
        suggestion: Some("Use the async fs API"),
        cwe_ids: &[],
    },
    PatternDef {
        id: "ts-json-deep-clone",
        pattern: r"JSON\.parse\s*\(\s*JSON\.stringify",
        anchor: Some("JSON.parse"),
        severity: Low,
        category: Performance,
        description: "JSON round-trip used as a deep clone",
        suggestion: Some("Use structuredClone()"),
        cwe_ids: &[],
    },
];

/// Python rules. Severity/CWE assignments follow the common weakness entries
/// for each construct.
pub const PYTHON: &[PatternDef] = &[
    PatternDef {
        id: "py-exec-usage",
        pattern: r"\bexec\s*\(",
        anchor: Some("exec"),
        severity: High,
        category: Security,
        description: "exec() runs arbitrary code",
        suggestion: Some("Avoid exec(); dispatch on validated input instead"),
        cwe_ids: &[78],
    },
    PatternDef {
        id: "py-eval-usage",
        pattern: r"\beval\s*\(",
        anchor: Some("eval"),
        severity: High,
        category: Security,
        description: "eval() runs arbitrary expressions",
        suggestion: Some("Use ast.literal_eval for literal parsing"),
        cwe_ids: &[95],
    },
    PatternDef {
        id: "py-pickle-load",
        pattern: r"pickle\.loads?\s*\(",
        anchor: Some("pickle"),
        severity: High,
        category: Security,
        description: "Unpickling untrusted data executes code",
        suggestion: Some("Use a safe serialization format such as JSON"),
        cwe_ids: &[502],
    },
    PatternDef {
        id: "py-yaml-load",
        pattern: r"yaml\.load\s*\(",
        anchor: Some("yaml.load"),
        severity: Medium,
        category: Security,
        description: "yaml.load without SafeLoader can construct objects",
        suggestion: Some("Use yaml.safe_load"),
        cwe_ids: &[502],
    },
    PatternDef {
        id: "py-subprocess-shell",
        pattern: r"shell\s*=\s*True",
        anchor: Some("shell"),
        severity: High,
        category: Security,
        description: "subprocess with shell=True enables injection",
        suggestion: Some("Pass an argument list with shell=False"),
        cwe_ids: &[78],
    },
    PatternDef {
        id: "py-weak-hash",
        pattern: r"hashlib\.(?:md5|sha1)\s*\(",
        anchor: Some("hashlib"),
        severity: Medium,
        category: Security,
        description: "Weak hash algorithm",
        suggestion: Some("Use sha256 or better"),
        cwe_ids: &[327],
    },
    PatternDef {
        id: "py-sql-fstring",
        pattern: r"\.execute(?:many)?\s*\(\s*f[\x22']",
        anchor: Some("execute"),
        severity: High,
        category: Security,
        description: "SQL statement interpolated with an f-string",
        suggestion: Some("Use parameterized queries"),
        cwe_ids: &[89],
    },
    PatternDef {
        id: "py-assert-usage",
        pattern: r"^\s*assert\b",
        anchor: Some("assert"),
        severity: Low,
        category: Security,
        description: "assert is stripped under -O; not a guard",
        suggestion: Some("Raise an explicit exception"),
        cwe_ids: &[676],
    },
    PatternDef {
        id: "py-bare-except",
        pattern: r"except\s*:",
        anchor: Some("except"),
        severity: Medium,
        category: Quality,
        description: "Bare except hides real failures",
        suggestion: Some("Catch a specific exception type"),
        cwe_ids: &[],
    },
    PatternDef {
        id: "py-print-debug",
        pattern: r"^\s*print\s*\(",
        anchor: Some("print"),
        severity: Low,
        category: Quality,
        description: "print() left in code",
        suggestion: Some("Route through logging"),
        cwe_ids: &[],
    },
    PatternDef {
        id: "py-wildcard-import",
        pattern: r"from\s+\S+\s+import\s+\*",
        anchor: Some("import"),
        severity: Low,
        category: Quality,
        description: "Wildcard import obscures provenance",
        suggestion: Some("Import names explicitly"),
        cwe_ids: &[],
    },
    PatternDef {
        id: "py-range-len",
        pattern: r"range\s*\(\s*len\s*\(",
        anchor: Some("range"),
        severity: Low,
        category: Performance,
        description: "Index loop over range(len(...))",
        suggestion: Some("Iterate directly or use enumerate()"),
        cwe_ids: &[],
    },
    PatternDef {
        id: "py-string-concat-loop",
        pattern: r"\+=\s*(?:f?[\x22']|str\()",
        anchor: Some("+="),
        severity: Low,
        category: Performance,
        description: "Repeated string concatenation",
        suggestion: Some("Accumulate into a list and join once"),
        cwe_ids: &[],
    },
];

/// SQL rules.
pub const SQL: &[PatternDef] = &[
    PatternDef {
        id: "sql-or-true",
        pattern: r"(?i)\bor\s+1\s*=\s*1\b",
        anchor: Some("or"),
        severity: Critical,
        category: Security,
        description: "Tautology predicate typical of injection payloads",
        suggestion: None,
        cwe_ids: &[89],
    },
    PatternDef {
        id: "sql-select-star",
        pattern: r"(?i)\bselect\s+\*",
        anchor: Some("select"),
        severity: Medium,
        category: Performance,
        description: "SELECT * fetches every column",
        suggestion: Some("Project only the columns you need"),
        cwe_ids: &[],
    },
    PatternDef {
        id: "sql-leading-wildcard",
        pattern: r"(?i)\blike\s+[\x22']%",
        anchor: Some("like"),
        severity: Medium,
        category: Performance,
        description: "Leading-wildcard LIKE defeats index use",
        suggestion: None,
        cwe_ids: &[],
    },
    PatternDef {
        id: "sql-delete-no-where",
        pattern: r"(?i)\bdelete\s+from\s+\S+\s*;?\s*$",
        anchor: Some("delete"),
        severity: High,
        category: Quality,
        description: "DELETE without a WHERE clause",
        suggestion: Some("Add a WHERE clause or use TRUNCATE deliberately"),
        cwe_ids: &[],
    },
    PatternDef {
        id: "sql-not-in-subquery",
        pattern: r"(?i)\bnot\s+in\s*\(\s*select\b",
        anchor: Some("not"),
        severity: Medium,
        category: Performance,
        description: "NOT IN with a subquery scans for every row",
        suggestion: Some("Rewrite as NOT EXISTS or a LEFT JOIN"),
        cwe_ids: &[],
    },
];

/// Language-agnostic rules, applied to every submission.
pub const AGNOSTIC: &[PatternDef] = &[
    PatternDef {
        id: "generic-hardcoded-secret",
        pattern: r#"(?i)\b(?:password|secret|api[_-]?key|token|credential)\b\s*[:=]\s*["'][^"']{4,}["']"#,
        anchor: None,
        severity: High,
        category: Security,
        description: "Possible hardcoded credential",
        suggestion: Some("Load secrets from the environment or a vault"),
        cwe_ids: &[798],
    },
    PatternDef {
        id: "generic-private-key",
        pattern: r"-----BEGIN (?:RSA |EC |OPENSSH )?PRIVATE KEY-----",
        anchor: Some("PRIVATE KEY"),
        severity: Critical,
        category: Security,
        description: "Private key material embedded in source",
        suggestion: Some("Remove the key and rotate it"),
        cwe_ids: &[798, 321],
    },
    PatternDef {
        id: "generic-todo-marker",
        pattern: r"(?i)\b(?:todo|fixme|xxx)\b",
        anchor: None,
        severity: Low,
        category: Quality,
        description: "Unresolved TODO/FIXME marker",
        suggestion: None,
        cwe_ids: &[],
    },
    PatternDef {
        id: "generic-long-line",
        pattern: r".{201,}",
        anchor: None,
        severity: Low,
        category: Quality,
        description: "Line longer than 200 characters",
        suggestion: None,
        cwe_ids: &[],
    },
];
