//! Heuristic complexity scoring
//!
//! Five independent weighted factors computed from the concatenated user
//! message text: length, code content, technical vocabulary, multi-step
//! structure, and question style. Pattern tables are data, not logic —
//! changing an entry changes tier assignment, so treat edits as a scoring
//! policy change.

use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

use crate::{ComplexityResult, Tier};

/// Factor weights; sum to 1.0, so the maximum weighted sum is 3.0
const WEIGHT_LENGTH: f64 = 0.15;
const WEIGHT_CODE: f64 = 0.25;
const WEIGHT_TECHNICAL: f64 = 0.20;
const WEIGHT_MULTISTEP: f64 = 0.20;
const WEIGHT_QUESTION: f64 = 0.20;

/// Every factor is clamped to this range before weighting
const FACTOR_MAX: f64 = 3.0;

/// A factor above this raw value is named in the reasoning string
const DOMINANT_FACTOR_FLOOR: f64 = 1.5;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("must be valid regex"))
        .collect()
}

/// Code-indicating patterns, matched case-sensitively against the raw text
static CODE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"```",
        r"\bdef\s+\w+\s*\(",
        r"\basync\s+def\b",
        r"\bclass\s+\w+\s*[:({]",
        r"\bfunction\s+\w*\s*\(",
        r"=>\s*\{",
        r"\blambda\s+\w+\s*:",
        r"\bfn\s+\w+\s*\(",
        r"(?m)^\s*import\s+\w+",
        r"\bfrom\s+\w+(?:\.\w+)*\s+import\b",
        r#"\brequire\s*\(\s*['"]"#,
        r#"#include\s*[<"]"#,
        r"(?m)^\s*use\s+\w+(?:::\w+)+",
        r"(?m)^\s*@\w+\s*$",
        r"</?(?:div|span|html|body|head|script|style|table|form|input|button|img|ul|ol|li|p|a|h[1-6])\b[^>]*>",
        r"\b(?:if|for|while)\s*\([^)]*\)\s*\{",
        r"\b(?:const|let|var)\s+\w+\s*=",
        r#"\breturn\s+[\w\[\{'"]"#,
    ])
});

/// Single-word technical terms, matched against the word set of the text
static TECHNICAL_TERMS: &[&str] = &[
    "api",
    "database",
    "sql",
    "nosql",
    "query",
    "server",
    "endpoint",
    "http",
    "rest",
    "graphql",
    "grpc",
    "websocket",
    "json",
    "yaml",
    "protobuf",
    "authentication",
    "authorization",
    "oauth",
    "jwt",
    "encryption",
    "hashing",
    "tls",
    "certificate",
    "async",
    "await",
    "thread",
    "threading",
    "concurrency",
    "parallelism",
    "mutex",
    "semaphore",
    "deadlock",
    "kernel",
    "cache",
    "caching",
    "redis",
    "docker",
    "kubernetes",
    "container",
    "microservice",
    "microservices",
    "serverless",
    "cloud",
    "deployment",
    "pipeline",
    "git",
    "repository",
    "rebase",
    "algorithm",
    "recursion",
    "optimization",
    "refactor",
    "refactoring",
    "debugging",
    "profiling",
    "benchmark",
    "latency",
    "throughput",
    "scalability",
    "scalable",
    "middleware",
    "orm",
    "migration",
    "schema",
    "transaction",
    "replication",
    "sharding",
    "partition",
    "kafka",
    "rabbitmq",
    "telemetry",
    "observability",
    "regex",
    "compiler",
    "interpreter",
    "runtime",
    "bytecode",
    "idempotent",
];

/// Multi-word technical terms, matched by substring
static TECHNICAL_PHRASES: &[&str] = &[
    "race condition",
    "dependency injection",
    "design pattern",
    "unit test",
    "integration test",
    "message queue",
    "connection pool",
    "load balancer",
    "machine learning",
    "neural network",
    "data structure",
    "binary search",
    "hash map",
    "linked list",
    "state machine",
    "event loop",
    "memory leak",
    "stack trace",
    "garbage collection",
    "pull request",
    "code review",
    "exception handling",
];

/// Multi-step linguistic indicators
static MULTISTEP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?m)^\s*\d+[.)]\s+",
        r"(?is)\bfirst\b.*\bthen\b",
        r"(?i)\bafter that\b",
        r"(?i)\bfinally\b",
        r"(?i)\bnext(?:,| step)\b",
        r"(?i)\bstep\s+\d+\b",
        r"(?is)\bif\b.*\belse\b",
        r"(?i)\bfollowed by\b",
        r"(?i)\bonce\s+(?:you|we|that|it)\b",
    ])
});

/// Elaboration-seeking question patterns
static COMPLEX_QUESTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\bwhy\s+(?:does|is|are|do|would)\b",
        r"(?i)\bexplain\s+(?:how|why|the)\b",
        r"(?is)\bhow\s+does\b.*\bwork\b",
        r"(?i)\bcompare\b",
        r"(?i)\bdifference\s+between\b",
        r"(?i)\btrade-?offs?\b",
        r"(?i)\bdesign\s+an?\b",
        r"(?i)\bpros\s+and\s+cons\b",
        r"(?i)\boptimi[sz]e\b",
        r"(?i)\bdebug\b",
        r"(?i)\brefactor\b",
        r"(?i)\bwalk\s+me\s+through\b",
        r"(?i)\bin\s+depth\b",
        r"(?i)\bbest\s+(?:way|approach|practice)\s+to\b",
        r"(?i)\bimplications\b",
        r"(?i)\bevaluate\b",
        r"(?i)\banaly[sz]e\b",
    ])
});

/// Simple-lookup question patterns, all anchored at the start of the text
static SIMPLE_QUESTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)^\s*what\s+is\b",
        r"(?i)^\s*what\s+are\b",
        r"(?i)^\s*who\s+(?:is|was)\b",
        r"(?i)^\s*when\s+(?:is|was|did)\b",
        r"(?i)^\s*where\s+is\b",
        r"(?i)^\s*how\s+do\s+i\b",
        r"(?i)^\s*how\s+to\b",
        r"(?i)^\s*how\s+(?:many|much)\b",
        r"(?i)^\s*list\b",
        r"(?i)^\s*show\s+me\b",
        r"(?i)^\s*tell\s+me\b",
        r"(?i)^\s*define\b",
        r"(?i)^\s*give\s+me\b",
        r"(?i)^\s*is\s+it\b",
        r"(?i)^\s*can\s+i\b",
    ])
});

/// Word tokenizer for technical-term membership tests
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z0-9_]+").expect("must be valid regex"));

/// Deterministic, side-effect-free complexity scorer
///
/// `score()` is a pure total function: malformed message records count as
/// absent content, empty input yields the fixed zero-score result, and
/// nothing in here logs or fails.
#[derive(Debug, Clone)]
pub struct ComplexityScorer {
    threshold: f64,
}

impl ComplexityScorer {
    /// Create a scorer with the given tier decision boundary
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Score a message sequence
    ///
    /// Only records with `role == "user"` and non-empty string content
    /// contribute; their contents are joined with single spaces before the
    /// factor computations.
    pub fn score(&self, messages: &[Value]) -> ComplexityResult {
        let text = user_text(messages);

        if text.is_empty() {
            return ComplexityResult {
                score: 0.0,
                factors: IndexMap::new(),
                tier: Tier::Simple,
                reasoning: "No user content to analyze".to_owned(),
            };
        }

        let lower = text.to_lowercase();

        let length = length_factor(&text);
        let code = code_factor(&text);
        let technical = technical_factor(&lower);
        let multistep = multistep_factor(&text);
        let question = question_factor(&text);

        let weighted = WEIGHT_LENGTH.mul_add(
            length,
            WEIGHT_CODE.mul_add(
                code,
                WEIGHT_TECHNICAL.mul_add(
                    technical,
                    WEIGHT_MULTISTEP.mul_add(multistep, WEIGHT_QUESTION * question),
                ),
            ),
        );

        // Normalize against the maximum possible weighted sum, not the
        // maximum raw sum. Rounding applies only to reported values.
        let score = round2(((weighted / FACTOR_MAX) * 10.0).clamp(0.0, 10.0));

        let tier = if score < self.threshold { Tier::Simple } else { Tier::Complex };

        let raw_factors = [
            ("length", length),
            ("code", code),
            ("technical", technical),
            ("multistep", multistep),
            ("question", question),
        ];

        let reasoning = reasoning(&raw_factors, tier);

        let factors = raw_factors
            .iter()
            .map(|&(name, value)| (name.to_owned(), round2(value)))
            .collect();

        ComplexityResult {
            score,
            factors,
            tier,
            reasoning,
        }
    }
}

/// Join the content of all user messages with single spaces
fn user_text(messages: &[Value]) -> String {
    let parts: Vec<&str> = messages
        .iter()
        .filter(|m| m.get("role").and_then(Value::as_str) == Some("user"))
        .filter_map(|m| m.get("content").and_then(Value::as_str))
        .filter(|c| !c.is_empty())
        .collect();

    parts.join(" ")
}

/// Bucket the character count: <100, <500, <1000, else
fn length_factor(text: &str) -> f64 {
    match text.chars().count() {
        0..100 => 0.0,
        100..500 => 1.0,
        500..1000 => 2.0,
        _ => 3.0,
    }
}

/// Count distinct code patterns matching, capped at 3
fn code_factor(text: &str) -> f64 {
    let mut matched = 0u32;
    for pattern in CODE_PATTERNS.iter() {
        if pattern.is_match(text) {
            matched += 1;
            if matched == 3 {
                break;
            }
        }
    }
    f64::from(matched)
}

/// Bucket the distinct technical-term count: 0, 1-2, 3-5, >=6
///
/// Single words are matched against the tokenized word set; multi-word
/// terms by substring. Deliberately naive — no stemming or normalization —
/// because changing the matcher silently changes tier assignment.
fn technical_factor(lower: &str) -> f64 {
    let words: HashSet<&str> = WORD_RE.find_iter(lower).map(|m| m.as_str()).collect();

    let mut hits = TECHNICAL_TERMS.iter().filter(|t| words.contains(**t)).count();
    hits += TECHNICAL_PHRASES.iter().filter(|p| lower.contains(**p)).count();

    match hits {
        0 => 0.0,
        1..=2 => 1.0,
        3..=5 => 2.0,
        _ => 3.0,
    }
}

/// Count distinct multi-step indicators matching, capped at 3
fn multistep_factor(text: &str) -> f64 {
    let matched = MULTISTEP_PATTERNS.iter().filter(|p| p.is_match(text)).take(3).count();
    matched as f64
}

/// Elaboration-seeking matches minus half the simple-lookup matches,
/// clamped to [0, 3]
fn question_factor(text: &str) -> f64 {
    let complex_matches = COMPLEX_QUESTION_PATTERNS.iter().filter(|p| p.is_match(text)).count();
    let simple_matches = SIMPLE_QUESTION_PATTERNS.iter().filter(|p| p.is_match(text)).count();

    0.5f64
        .mul_add(-(simple_matches as f64), complex_matches as f64)
        .clamp(0.0, FACTOR_MAX)
}

/// Name the dominant factors, phrased for the selected tier
fn reasoning(factors: &[(&str, f64)], tier: Tier) -> String {
    let dominant: Vec<&str> = factors
        .iter()
        .filter(|(_, value)| *value > DOMINANT_FACTOR_FLOOR)
        .map(|(name, _)| *name)
        .collect();

    if dominant.is_empty() {
        return "Low complexity request with no dominant factors".to_owned();
    }

    let joined = dominant.join(", ");
    match tier {
        Tier::Simple => format!("Low complexity despite {joined}"),
        Tier::Complex => format!("High complexity due to {joined}"),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
