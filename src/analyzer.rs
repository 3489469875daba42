//! Password analyzer - request orchestration.
//!
//! Validates the input, builds the induced graph against the shared
//! reference graph, runs the structural metrics and scorers and assembles
//! the immutable [`AnalysisResult`]. Each request is stateless and
//! independent; requests may run fully in parallel.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::graph::InducedGraph;
use crate::metrics;
use crate::reference::reference_graph;
use crate::scoring::{Rating, composite_score, length_score, variety_score};

/// Longest accepted password, in characters.
pub const MAX_PASSWORD_LEN: usize = 256;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Password required")]
    Empty,
    #[error("Password exceeds the maximum length of {MAX_PASSWORD_LEN} characters")]
    TooLong,
    #[cfg(feature = "async")]
    #[error("Analysis cancelled")]
    Cancelled,
}

/// Per-request analysis record. Serializes to the JSON object the client
/// consumes; never persisted, never echoes the password itself.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub length: usize,
    pub rating: Rating,
    pub final_score: f64,
    pub variety_score: f64,
    pub length_score: f64,
    pub adjacency_ratio: f64,
    pub longest_simple_path_length: usize,
    /// Characters realizing the longest path. A substring of the input when
    /// the path is a contiguous typed run (the common case); otherwise the
    /// path's characters in first-occurrence order.
    pub longest_path_segment: String,
    pub vc_ratio: f64,
    pub induced_nodes: Vec<String>,
    pub induced_edges: Vec<[String; 2]>,
    pub avg_log_degree: f64,
    /// True when the path search fell back to its heuristic. Not part of
    /// the wire contract.
    #[serde(skip)]
    pub path_approximate: bool,
    /// True when the cover came from the 2-approximation. Not part of the
    /// wire contract.
    #[serde(skip)]
    pub vc_approximate: bool,
}

/// Analyzes a password and returns its structural strength assessment.
///
/// # Arguments
/// * `password` - The password to analyze
/// * `token` - Optional cancellation token (async feature only)
///
/// # Errors
/// [`AnalyzeError::Empty`] for empty input, [`AnalyzeError::TooLong`] for
/// input over [`MAX_PASSWORD_LEN`] characters; both are reported before any
/// metric is computed.
pub fn analyze_password(
    password: &SecretString,
    #[cfg(feature = "async")] token: Option<CancellationToken>,
) -> Result<AnalysisResult, AnalyzeError> {
    let chars: Vec<char> = password.expose_secret().chars().collect();
    if chars.is_empty() {
        return Err(AnalyzeError::Empty);
    }
    if chars.len() > MAX_PASSWORD_LEN {
        return Err(AnalyzeError::TooLong);
    }

    let reference = reference_graph();
    let graph = InducedGraph::build(password.expose_secret(), reference);

    // Check cancellation between the cheap build and the combinatorial
    // searches (async only)
    #[cfg(feature = "async")]
    if let Some(ref t) = token {
        if t.is_cancelled() {
            return Err(AnalyzeError::Cancelled);
        }
    }

    let structural = metrics::compute(&chars, &graph, reference);

    #[cfg(feature = "async")]
    if let Some(ref t) = token {
        if t.is_cancelled() {
            return Err(AnalyzeError::Cancelled);
        }
    }

    let variety = variety_score(&chars);
    let length = length_score(chars.len());
    let path_ratio = structural.longest_path_length as f64 / chars.len() as f64;
    let final_score = composite_score(
        length,
        variety,
        structural.adjacency_ratio,
        structural.vc_ratio,
        path_ratio,
    );

    let induced_nodes = graph.nodes().iter().map(|c| c.to_string()).collect();
    let induced_edges = graph
        .edges()
        .iter()
        .map(|e| [graph.nodes()[e.a].to_string(), graph.nodes()[e.b].to_string()])
        .collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        length = chars.len(),
        final_score,
        path_approximate = structural.path_approximate,
        vc_approximate = structural.vc_approximate,
        "password analyzed"
    );

    Ok(AnalysisResult {
        length: chars.len(),
        rating: Rating::from_score(final_score),
        final_score,
        variety_score: variety,
        length_score: length,
        adjacency_ratio: structural.adjacency_ratio,
        longest_simple_path_length: structural.longest_path_length,
        longest_path_segment: structural.longest_path_segment,
        vc_ratio: structural.vc_ratio,
        induced_nodes,
        induced_edges,
        avg_log_degree: structural.avg_log_degree,
        path_approximate: structural.path_approximate,
        vc_approximate: structural.vc_approximate,
    })
}

/// Async version that sends the analysis outcome via channel.
#[cfg(feature = "async")]
pub async fn analyze_password_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<Result<AnalysisResult, AnalyzeError>>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("analysis is about to start...");

    let outcome = analyze_password(password, Some(token));

    if let Err(e) = tx.send(outcome).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password analysis result: {}", e);
        #[cfg(not(feature = "tracing"))]
        let _ = e;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(pw: &str) -> Result<AnalysisResult, AnalyzeError> {
        let pwd = SecretString::new(pw.to_string().into());

        #[cfg(feature = "async")]
        let outcome = analyze_password(&pwd, None);

        #[cfg(not(feature = "async"))]
        let outcome = analyze_password(&pwd);

        outcome
    }

    fn assert_invariants(r: &AnalysisResult) {
        assert!((0.0..=1.0).contains(&r.variety_score));
        assert!((0.0..=1.0).contains(&r.length_score));
        assert!((0.0..=1.0).contains(&r.adjacency_ratio));
        assert!((0.0..=1.0).contains(&r.vc_ratio));
        assert!((0.0..=100.0).contains(&r.final_score));
        assert!(r.avg_log_degree >= 0.0);
        assert!(r.longest_simple_path_length >= 1);
        assert!(r.longest_simple_path_length <= r.length);
        assert_eq!(r.rating, Rating::from_score(r.final_score));
    }

    #[test]
    fn test_empty_password_is_rejected() {
        assert!(matches!(analyze(""), Err(AnalyzeError::Empty)));
    }

    #[test]
    fn test_overlong_password_is_rejected() {
        let long = "x".repeat(MAX_PASSWORD_LEN + 1);
        assert!(matches!(analyze(&long), Err(AnalyzeError::TooLong)));
        let max = "x".repeat(MAX_PASSWORD_LEN);
        assert!(analyze(&max).is_ok());
    }

    #[test]
    fn test_single_char_boundary() {
        let r = analyze("a").unwrap();
        assert_eq!(r.length, 1);
        assert_eq!(r.induced_nodes, vec!["a".to_string()]);
        assert!(r.induced_edges.is_empty());
        assert_eq!(r.adjacency_ratio, 0.0);
        assert_eq!(r.vc_ratio, 0.0);
        assert_eq!(r.longest_simple_path_length, 1);
        assert!((r.final_score - 38.4375).abs() < 0.05);
        assert_eq!(r.rating, Rating::Weak);
        assert_invariants(&r);
    }

    #[test]
    fn test_scenario_aaa() {
        let r = analyze("aaa").unwrap();
        assert_eq!(r.length, 3);
        assert_eq!(r.variety_score, 0.25);
        assert_eq!(r.length_score, 0.1875);
        assert_eq!(r.adjacency_ratio, 1.0);
        assert_eq!(r.vc_ratio, 0.0);
        assert_eq!(r.longest_simple_path_length, 1);
        assert!((r.final_score - 29.479).abs() < 0.05);
        assert_eq!(r.rating, Rating::Weak);
        assert_invariants(&r);
    }

    #[test]
    fn test_scenario_qwerty() {
        let r = analyze("qwerty").unwrap();
        assert_eq!(r.length, 6);
        assert_eq!(r.induced_nodes.len(), 6);
        assert_eq!(r.induced_edges.len(), 5);
        assert_eq!(r.adjacency_ratio, 1.0);
        assert!((r.vc_ratio - 0.5).abs() < 1e-12);
        assert_eq!(r.longest_simple_path_length, 6);
        assert_eq!(r.longest_path_segment, "qwerty");
        assert!((r.final_score - 24.375).abs() < 0.05);
        assert_eq!(r.rating, Rating::VeryWeak);
        assert_invariants(&r);
    }

    #[test]
    fn test_long_varied_password_scores_high() {
        let r = analyze("correcthorsebatterystaple").unwrap();
        assert!(r.final_score > 50.0, "got {}", r.final_score);
        assert_invariants(&r);
    }

    #[test]
    fn test_determinism() {
        let a = analyze("P@ssw0rd!").unwrap();
        let b = analyze("P@ssw0rd!").unwrap();
        assert_eq!(a.final_score, b.final_score);
        assert_eq!(a.rating, b.rating);
        assert_eq!(a.longest_path_segment, b.longest_path_segment);
        assert_eq!(a.induced_nodes, b.induced_nodes);
        assert_eq!(a.induced_edges, b.induced_edges);
    }

    #[test]
    fn test_invariants_over_sample_inputs() {
        for pw in [
            "a",
            "aaa",
            "qwerty",
            "P@ssw0rd!",
            "correcthorsebatterystaple",
            "Tr0ub4dor&3",
            "    ",
            "päss wörd",
            "1qaz2wsx",
            "zxcvbnm,./",
        ] {
            let r = analyze(pw).unwrap();
            assert_invariants(&r);
            assert_eq!(r.length, pw.chars().count());
            assert_eq!(r.induced_nodes.len(), pw.chars().collect::<std::collections::HashSet<_>>().len());
        }
    }

    #[test]
    fn test_result_serializes_to_wire_contract() {
        let r = analyze("qwerty").unwrap();
        let value = serde_json::to_value(&r).unwrap();
        let obj = value.as_object().unwrap();
        for field in [
            "length",
            "rating",
            "final_score",
            "variety_score",
            "length_score",
            "adjacency_ratio",
            "longest_simple_path_length",
            "longest_path_segment",
            "vc_ratio",
            "induced_nodes",
            "induced_edges",
            "avg_log_degree",
        ] {
            assert!(obj.contains_key(field), "missing {field}");
        }
        assert_eq!(obj.len(), 12);
        assert_eq!(obj["rating"], serde_json::json!("very weak"));
        assert!(obj["induced_edges"][0].as_array().unwrap().len() == 2);
    }
}

#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;

    #[tokio::test]
    async fn test_analyze_with_cancellation() {
        let token = CancellationToken::new();
        token.cancel();

        let pwd = SecretString::new("SomePassword123!".to_string().into());
        let outcome = analyze_password(&pwd, Some(token));
        assert!(matches!(outcome, Err(AnalyzeError::Cancelled)));
    }

    #[tokio::test]
    async fn test_analyze_without_cancellation() {
        let token = CancellationToken::new();

        let pwd = SecretString::new("TestPass123!".to_string().into());
        let outcome = analyze_password(&pwd, Some(token));
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_analyze_password_tx() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();

        let pwd = SecretString::new("TestPass123!".to_string().into());
        analyze_password_tx(&pwd, token, tx).await;

        let outcome = rx.recv().await.expect("Should receive analysis result");
        assert!(outcome.unwrap().final_score > 0.0);
    }
}
