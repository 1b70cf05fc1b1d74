// src/report/analysis.rs
use serde::Deserialize;

use crate::report::{or_na, NOT_AVAILABLE};

/// Per-document analysis report as returned by `POST /analyze`.
///
/// Every field is optional: the backend assembles this from several agents
/// and any of them may come back empty. Missing fields are rendered as
/// "N/A" rather than treated as errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub recommendation: Option<Recommendation>,
    #[serde(default)]
    pub risk: Option<RiskAssessment>,
    #[serde(default)]
    pub metrics: Option<Metrics>,
    #[serde(default)]
    pub team: Option<Team>,
    #[serde(default)]
    pub public_data: Option<PublicData>,
    #[serde(default)]
    pub benchmark: Option<Benchmark>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub investment_rationale: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RiskAssessment {
    #[serde(default)]
    pub financial_risk: Option<String>,
    #[serde(default)]
    pub market_risk: Option<String>,
    #[serde(default)]
    pub execution_risk: Option<String>,
    #[serde(default)]
    pub overall_risk: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub revenue: Option<String>,
    #[serde(default)]
    pub cac: Option<String>,
    #[serde(default)]
    pub ltv: Option<String>,
    #[serde(default)]
    pub tam: Option<String>,
    #[serde(default)]
    pub sam: Option<String>,
    #[serde(default)]
    pub som: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub founders_background: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicData {
    #[serde(default)]
    pub public_data_summary: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Benchmark {
    #[serde(default)]
    pub benchmark_summary: Option<String>,
}

/// Risk dashboard category order. Fixed, not alphabetical.
pub const RISK_CATEGORIES: [&str; 4] = ["Financial", "Market", "Execution", "Overall"];

/// Radar chart axis order, each scored 0-5.
pub const RADAR_AXES: [&str; 5] = ["Financial", "Market", "Team", "Execution", "Benchmark"];

/// One plotted point on the market-size vs. unit-economics chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubblePoint {
    /// Currency-parsed TAM, unparsable input collapses to 0.
    pub tam: f64,
    /// LTV/CAC ratio; CAC is clamped to 1 when absent or zero-parsed.
    pub ltv_cac: f64,
    /// Recommendation confidence, default 50.
    pub radius: f64,
}

impl AnalysisReport {
    /// Status badge text, e.g. `"INVEST (85%)"`.
    pub fn status_text(&self) -> String {
        let rec = self.recommendation.as_ref();
        let verdict = rec
            .and_then(|r| r.recommendation.as_deref())
            .unwrap_or(NOT_AVAILABLE);
        let confidence = rec
            .and_then(|r| r.confidence)
            .map(|c| c.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        format!("{} ({}%)", verdict, confidence)
    }

    pub fn rationale(&self) -> &str {
        self.recommendation
            .as_ref()
            .map(|r| or_na(&r.investment_rationale))
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Upper-cased risk level for one dashboard category, defaulting to
    /// "LOW" when the field is absent.
    pub fn risk_level(&self, category: &str) -> String {
        let level = self.risk.as_ref().and_then(|risk| {
            match category.to_lowercase().as_str() {
                "financial" => risk.financial_risk.as_deref(),
                "market" => risk.market_risk.as_deref(),
                "execution" => risk.execution_risk.as_deref(),
                "overall" => risk.overall_risk.as_deref(),
                _ => None,
            }
        });
        level.unwrap_or("LOW").to_uppercase()
    }

    /// Radar scores in `RADAR_AXES` order.
    ///
    /// Financial/Market/Execution derive from the risk level. Team is 4
    /// unless the founders background carries an agent error marker.
    /// Benchmark is 4 when the summary reads "strong", else 2.
    pub fn radar_scores(&self) -> [f64; 5] {
        let team = match self.team.as_ref().and_then(|t| t.founders_background.as_deref()) {
            Some(text) if text.contains("Error") => 1.0,
            _ => 4.0,
        };
        let benchmark = match self.benchmark.as_ref().and_then(|b| b.benchmark_summary.as_deref()) {
            Some(text) if text.contains("strong") => 4.0,
            _ => 2.0,
        };
        [
            risk_score(&self.risk_level("Financial")),
            risk_score(&self.risk_level("Market")),
            team,
            risk_score(&self.risk_level("Execution")),
            benchmark,
        ]
    }

    pub fn bubble_point(&self) -> BubblePoint {
        let metric = |field: fn(&Metrics) -> &Option<String>| -> f64 {
            self.metrics
                .as_ref()
                .and_then(|m| field(m).as_deref())
                .map(parse_currency)
                .unwrap_or(0.0)
        };
        let tam = metric(|m| &m.tam);
        let ltv = metric(|m| &m.ltv);
        let mut cac = metric(|m| &m.cac);
        if cac == 0.0 {
            cac = 1.0;
        }
        let radius = self
            .recommendation
            .as_ref()
            .and_then(|r| r.confidence)
            .unwrap_or(50.0);
        BubblePoint { tam, ltv_cac: ltv / cac, radius }
    }

    /// (label, value) pairs for the raw-data section, in display order.
    pub fn raw_data_rows(&self) -> Vec<(&'static str, &str)> {
        fn metric<'a>(
            metrics: &'a Option<Metrics>,
            field: fn(&Metrics) -> &Option<String>,
        ) -> &'a str {
            metrics
                .as_ref()
                .map(|m| or_na(field(m)))
                .unwrap_or(NOT_AVAILABLE)
        }
        let m = &self.metrics;
        vec![
            ("Revenue", metric(m, |m| &m.revenue)),
            ("CAC", metric(m, |m| &m.cac)),
            ("LTV", metric(m, |m| &m.ltv)),
            ("TAM", metric(m, |m| &m.tam)),
            ("SAM", metric(m, |m| &m.sam)),
            ("SOM", metric(m, |m| &m.som)),
        ]
    }

    pub fn team_background(&self) -> &str {
        self.team
            .as_ref()
            .map(|t| or_na(&t.founders_background))
            .unwrap_or(NOT_AVAILABLE)
    }

    pub fn public_data_summary(&self) -> &str {
        self.public_data
            .as_ref()
            .map(|p| or_na(&p.public_data_summary))
            .unwrap_or(NOT_AVAILABLE)
    }

    pub fn benchmark_summary(&self) -> &str {
        self.benchmark
            .as_ref()
            .map(|b| or_na(&b.benchmark_summary))
            .unwrap_or(NOT_AVAILABLE)
    }
}

/// Risk level to radar score. Case-insensitive; unrecognized levels score 0.
pub fn risk_score(level: &str) -> f64 {
    match level.to_uppercase().as_str() {
        "HIGH" => 1.0,
        "MEDIUM" => 3.0,
        "LOW" => 5.0,
        _ => 0.0,
    }
}

/// Parses a loosely formatted currency string for plotting.
///
/// Keeps only digits, `.` and `-`; everything else (currency symbols,
/// commas, magnitude suffixes like "M") is stripped, NOT expanded, so
/// "$1.2M" parses as 1.2. Anything unparsable collapses to 0.
pub fn parse_currency(raw: &str) -> f64 {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    filtered.parse().unwrap_or(0.0)
}
