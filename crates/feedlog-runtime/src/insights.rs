//! Best-effort prose insights over an analysis result.
//!
//! An [`InsightGenerator`] (typically an external text-generation service)
//! receives a compact JSON projection of the result and returns a JSON
//! array of titled insights. Every failure mode — the call itself, or
//! output that does not parse as the expected shape — degrades to a
//! placeholder report carrying an error marker; insight generation never
//! aborts an analysis.

use feedlog_core::models::AnalysisResult;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Placeholder used when the generator fails outright.
const FALLBACK_TEXT: &str =
    "Feeding summary is available, but automatic insights could not be generated.";

// ── InsightContext ────────────────────────────────────────────────────────────

/// Compact projection of an [`AnalysisResult`] handed to the generator.
///
/// Deliberately small: totals, the trend signal and the busiest slot are
/// enough context for a prose summary without shipping the full event list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightContext {
    pub total_feeds: u32,
    pub average_feed_size: f64,
    pub average_daily_feeds: f64,
    /// Latest week-over-week percent change, absent under 14 days of data.
    pub percent_change: Option<f64>,
    /// Label of the slot with the most feeds.
    pub busiest_slot: String,
    pub recommended_intake: f64,
}

impl InsightContext {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let busiest_slot = result
            .time_stats
            .iter()
            .max_by_key(|s| s.count)
            .map(|s| s.slot.clone())
            .unwrap_or_default();

        Self {
            total_feeds: result.overall_stats.total_bottle_feeds,
            average_feed_size: result.overall_stats.average_feed_size,
            average_daily_feeds: result.overall_stats.average_daily_feeds,
            percent_change: result.recent_trend.as_ref().map(|t| t.percent_change),
            busiest_slot,
            recommended_intake: result.recommended_intake,
        }
    }
}

// ── Insight / InsightReport ───────────────────────────────────────────────────

/// One titled insight string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub text: String,
}

/// The outcome of insight generation, degraded or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub insights: Vec<Insight>,
    /// `true` when the generator failed or returned an unexpected shape.
    pub degraded: bool,
    /// Description of what went wrong, present only when degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ── InsightGenerator ──────────────────────────────────────────────────────────

/// Anything that can turn an [`InsightContext`] into free text.
///
/// Expected output is a JSON array of `{"title", "text"}` objects, but
/// implementations are not trusted to honor that — see
/// [`generate_insights`].
pub trait InsightGenerator {
    fn generate(&self, context: &InsightContext) -> anyhow::Result<String>;
}

/// Local rule-based generator used when no external service is wired up.
///
/// Renders the structured context straight into the expected JSON shape,
/// so it never degrades.
pub struct TemplateInsightGenerator;

impl InsightGenerator for TemplateInsightGenerator {
    fn generate(&self, context: &InsightContext) -> anyhow::Result<String> {
        let mut insights = vec![Insight {
            title: "Feeding pattern".to_string(),
            text: format!(
                "{} bottle feeds averaging {} ml, about {} per day; busiest window is {}.",
                context.total_feeds,
                context.average_feed_size,
                context.average_daily_feeds,
                context.busiest_slot
            ),
        }];

        match context.percent_change {
            Some(pct) if pct > 0.0 => insights.push(Insight {
                title: "Trend".to_string(),
                text: format!("Average intake is up {pct}% compared with the previous week."),
            }),
            Some(pct) if pct < 0.0 => insights.push(Insight {
                title: "Trend".to_string(),
                text: format!(
                    "Average intake is down {}% compared with the previous week.",
                    -pct
                ),
            }),
            Some(_) => insights.push(Insight {
                title: "Trend".to_string(),
                text: "Average intake is steady week over week.".to_string(),
            }),
            None => {}
        }

        Ok(serde_json::to_string(&insights)?)
    }
}

// ── Generation with graceful degradation ──────────────────────────────────────

/// Parse generator output as the expected JSON array of insights.
fn parse_insights(raw: &str) -> Option<Vec<Insight>> {
    serde_json::from_str::<Vec<Insight>>(raw).ok().filter(|v| !v.is_empty())
}

/// Run a generator over a context, degrading gracefully on any failure.
///
/// * Generator error → a fixed placeholder insight plus the error text.
/// * Unparseable output → the raw text is kept as a single untitled-shape
///   insight, still marked degraded.
pub fn generate_insights(
    generator: &dyn InsightGenerator,
    context: &InsightContext,
) -> InsightReport {
    match generator.generate(context) {
        Ok(raw) => match parse_insights(&raw) {
            Some(insights) => InsightReport {
                insights,
                degraded: false,
                error: None,
            },
            None => {
                warn!("insight generator returned an unexpected shape; keeping raw text");
                InsightReport {
                    insights: vec![Insight {
                        title: "Feeding insights".to_string(),
                        text: raw,
                    }],
                    degraded: true,
                    error: Some("unstructured generator response".to_string()),
                }
            }
        },
        Err(e) => {
            warn!(error = %e, "insight generation failed; using placeholder");
            InsightReport {
                insights: vec![Insight {
                    title: "Insights unavailable".to_string(),
                    text: FALLBACK_TEXT.to_string(),
                }],
                degraded: true,
                error: Some(e.to_string()),
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use feedlog_core::calculations::AnalysisConfig;
    use feedlog_data::analysis::analyze_feeds;

    fn sample_context() -> InsightContext {
        let raw = "Type,Start,Start Location,End Condition\n\
                   Feed,2023-03-01 08:00,Bottle,120ml\n\
                   Feed,2023-03-01 09:30,Bottle,110ml\n\
                   Feed,2023-03-01 20:30,Bottle,150ml";
        let result = analyze_feeds(raw, &AnalysisConfig::default()).unwrap();
        InsightContext::from_result(&result)
    }

    struct FailingGenerator;
    impl InsightGenerator for FailingGenerator {
        fn generate(&self, _: &InsightContext) -> anyhow::Result<String> {
            anyhow::bail!("upstream service unavailable")
        }
    }

    struct ProseGenerator;
    impl InsightGenerator for ProseGenerator {
        fn generate(&self, _: &InsightContext) -> anyhow::Result<String> {
            Ok("Baby is feeding well.".to_string())
        }
    }

    // ── InsightContext ────────────────────────────────────────────────────────

    #[test]
    fn test_context_projection() {
        let ctx = sample_context();
        assert_eq!(ctx.total_feeds, 3);
        assert_eq!(ctx.average_feed_size, 126.7);
        assert!(ctx.percent_change.is_none());
        assert_eq!(ctx.busiest_slot, "6am-12pm");
        assert_eq!(ctx.recommended_intake, 600.0);
    }

    #[test]
    fn test_context_serializes_camel_case() {
        let json = serde_json::to_value(sample_context()).unwrap();
        assert!(json.get("totalFeeds").is_some());
        assert!(json.get("busiestSlot").is_some());
        assert!(json["percentChange"].is_null());
    }

    // ── TemplateInsightGenerator ──────────────────────────────────────────────

    #[test]
    fn test_template_generator_produces_parseable_output() {
        let raw = TemplateInsightGenerator.generate(&sample_context()).unwrap();
        let insights = parse_insights(&raw).unwrap();
        assert_eq!(insights[0].title, "Feeding pattern");
        assert!(insights[0].text.contains("3 bottle feeds"));
    }

    #[test]
    fn test_template_generator_mentions_trend_when_present() {
        let mut ctx = sample_context();
        ctx.percent_change = Some(-7.5);
        let raw = TemplateInsightGenerator.generate(&ctx).unwrap();
        let insights = parse_insights(&raw).unwrap();
        assert_eq!(insights.len(), 2);
        assert!(insights[1].text.contains("down 7.5%"));
    }

    // ── generate_insights ─────────────────────────────────────────────────────

    #[test]
    fn test_generate_insights_success_path() {
        let report = generate_insights(&TemplateInsightGenerator, &sample_context());
        assert!(!report.degraded);
        assert!(report.error.is_none());
        assert!(!report.insights.is_empty());
    }

    #[test]
    fn test_generator_failure_degrades_to_placeholder() {
        let report = generate_insights(&FailingGenerator, &sample_context());
        assert!(report.degraded);
        assert_eq!(report.insights.len(), 1);
        assert_eq!(report.insights[0].title, "Insights unavailable");
        assert!(report.error.as_deref().unwrap().contains("unavailable"));
    }

    #[test]
    fn test_unstructured_output_degrades_but_keeps_text() {
        let report = generate_insights(&ProseGenerator, &sample_context());
        assert!(report.degraded);
        assert_eq!(report.insights[0].text, "Baby is feeding well.");
        assert!(report.error.is_some());
    }

    #[test]
    fn test_parse_insights_rejects_empty_array() {
        assert!(parse_insights("[]").is_none());
        assert!(parse_insights("not json").is_none());
    }
}
