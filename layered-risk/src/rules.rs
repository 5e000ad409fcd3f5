//! Declarative risk rule table.
//!
//! Every rule belongs to one [`RiskCategory`] and fires on lowercase clause
//! text through one of three checks:
//!
//! - `Keywords`: all of `all_of`, at least one of `any_of`, none of `none_of`,
//!   and not every one of `unless_all_of`
//! - `PenaltyRate`: the first `"<N>% ... penalty"` rate exceeds a bound
//! - `TightTimeline`: each `"<N> hours/days/weeks"` figure shorter than a bound
//!
//! The default table lives in [`RiskRuleTable::default`]; tests and callers
//! can substitute their own.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{RiskCategory, RiskFactor};

static PENALTY_RATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)%.*penalty").expect("Invalid penalty rate regex")
});

static TIMELINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s*(hour|day|week)s?\b").expect("Invalid timeline regex")
});

/// How a rule inspects clause text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RiskCheck {
    Keywords {
        #[serde(default)]
        all_of: Vec<String>,
        #[serde(default)]
        any_of: Vec<String>,
        #[serde(default)]
        none_of: Vec<String>,
        /// Suppresses the rule only when every listed term is present.
        #[serde(default)]
        unless_all_of: Vec<String>,
    },
    /// Description may use `{rate}`.
    PenaltyRate { above: f64 },
    /// Description may use `{amount}` and `{unit}`.
    TightTimeline { under_days: f64 },
}

/// One red-flag predicate with the factor it yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRule {
    pub category: RiskCategory,
    pub description: String,
    pub severity: f64,
    pub likelihood: f64,
    pub impact: String,
    pub mitigation: String,
    pub check: RiskCheck,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl RiskRule {
    pub fn new(
        category: RiskCategory,
        description: &str,
        severity: f64,
        likelihood: f64,
        check: RiskCheck,
    ) -> Self {
        Self {
            category,
            description: description.to_string(),
            severity,
            likelihood,
            impact: String::new(),
            mitigation: String::new(),
            check,
        }
    }

    /// A keyword rule with empty lists; fill them with the `with_*` methods.
    pub fn keywords(category: RiskCategory, description: &str, severity: f64, likelihood: f64) -> Self {
        Self::new(
            category,
            description,
            severity,
            likelihood,
            RiskCheck::Keywords {
                all_of: Vec::new(),
                any_of: Vec::new(),
                none_of: Vec::new(),
                unless_all_of: Vec::new(),
            },
        )
    }

    pub fn with_all_of(mut self, terms: &[&str]) -> Self {
        if let RiskCheck::Keywords { all_of, .. } = &mut self.check {
            *all_of = owned(terms);
        }
        self
    }

    pub fn with_any_of(mut self, terms: &[&str]) -> Self {
        if let RiskCheck::Keywords { any_of, .. } = &mut self.check {
            *any_of = owned(terms);
        }
        self
    }

    pub fn with_none_of(mut self, terms: &[&str]) -> Self {
        if let RiskCheck::Keywords { none_of, .. } = &mut self.check {
            *none_of = owned(terms);
        }
        self
    }

    pub fn with_unless_all_of(mut self, terms: &[&str]) -> Self {
        if let RiskCheck::Keywords { unless_all_of, .. } = &mut self.check {
            *unless_all_of = owned(terms);
        }
        self
    }

    pub fn with_impact(mut self, impact: &str) -> Self {
        self.impact = impact.to_string();
        self
    }

    pub fn with_mitigation(mut self, mitigation: &str) -> Self {
        self.mitigation = mitigation.to_string();
        self
    }

    /// Factors this rule yields for `lower` (already lowercased clause text).
    pub fn evaluate(&self, lower: &str) -> Vec<RiskFactor> {
        match &self.check {
            RiskCheck::Keywords {
                all_of,
                any_of,
                none_of,
                unless_all_of,
            } => {
                if all_of.is_empty() && any_of.is_empty() {
                    return Vec::new();
                }
                let fires = all_of.iter().all(|t| lower.contains(t.as_str()))
                    && (any_of.is_empty() || any_of.iter().any(|t| lower.contains(t.as_str())))
                    && !none_of.iter().any(|t| lower.contains(t.as_str()))
                    && (unless_all_of.is_empty()
                        || !unless_all_of.iter().all(|t| lower.contains(t.as_str())));
                if fires {
                    vec![self.factor(self.description.clone())]
                } else {
                    Vec::new()
                }
            }
            RiskCheck::PenaltyRate { above } => PENALTY_RATE
                .captures(lower)
                .and_then(|caps| caps[1].parse::<f64>().ok())
                .filter(|rate| rate > above)
                .map(|rate| vec![self.factor(self.description.replace("{rate}", &format_rate(rate)))])
                .unwrap_or_default(),
            RiskCheck::TightTimeline { under_days } => TIMELINE
                .captures_iter(lower)
                .filter_map(|caps| {
                    let amount: u32 = caps[1].parse().ok()?;
                    let unit = &caps[2];
                    let days = match unit {
                        "hour" => f64::from(amount) / 24.0,
                        "week" => f64::from(amount) * 7.0,
                        _ => f64::from(amount),
                    };
                    if days < *under_days {
                        let description = self
                            .description
                            .replace("{amount}", &amount.to_string())
                            .replace("{unit}", &format!("{}s", unit));
                        Some(self.factor(description))
                    } else {
                        None
                    }
                })
                .collect(),
        }
    }

    fn factor(&self, description: String) -> RiskFactor {
        RiskFactor {
            category: self.category,
            description,
            severity: self.severity,
            likelihood: self.likelihood,
            impact: self.impact.clone(),
            mitigation: self.mitigation.clone(),
        }
    }
}

fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{:.0}", rate)
    } else {
        rate.to_string()
    }
}

/// Ordered rule collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRuleTable {
    rules: Vec<RiskRule>,
}

impl RiskRuleTable {
    pub fn new(rules: Vec<RiskRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RiskRule] {
        &self.rules
    }

    /// Evaluate every rule, grouped by category in [`RiskCategory::ALL`] order
    /// and in table order within a category.
    pub fn evaluate(&self, text: &str) -> Vec<RiskFactor> {
        let lower = text.to_lowercase();
        RiskCategory::ALL
            .iter()
            .flat_map(|category| {
                self.rules
                    .iter()
                    .filter(move |rule| rule.category == *category)
                    .flat_map(|rule| rule.evaluate(&lower))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

impl Default for RiskRuleTable {
    fn default() -> Self {
        use RiskCategory::*;

        Self::new(vec![
            // ============================================================
            // Financial
            // ============================================================
            RiskRule::keywords(Financial, "Payment terms lack penalty provisions for late payment", 6.0, 0.3)
                .with_any_of(&["payment"])
                .with_unless_all_of(&["penalty", "interest"])
                .with_impact("Potential cash flow issues and collection difficulties")
                .with_mitigation("Add late payment penalties and interest charges"),
            RiskRule::keywords(Financial, "Unlimited liability exposure without caps", 8.0, 0.2)
                .with_any_of(&["liable"])
                .with_none_of(&["limit"])
                .with_impact("Potentially catastrophic financial exposure")
                .with_mitigation("Insert liability caps and limitations"),
            RiskRule::keywords(Financial, "Explicitly uncapped damages exposure", 9.5, 1.0)
                .with_any_of(&["unlimited damages", "unlimited liability", "any and all damages", "all damages"])
                .with_none_of(&["not exceed"])
                .with_impact("Potentially catastrophic financial exposure")
                .with_mitigation("Insert an aggregate liability cap tied to contract value"),
            RiskRule::keywords(Financial, "Currency exchange rate risk without hedging", 5.0, 0.4)
                .with_any_of(&["currency", "exchange", "usd", "eur"])
                .with_none_of(&["hedg", "fix"])
                .with_impact("Potential financial losses from rate fluctuations")
                .with_mitigation("Include currency hedging or fixed rate provisions"),
            RiskRule::new(
                Financial,
                "High penalty rate of {rate}% may be excessive",
                7.0,
                0.3,
                RiskCheck::PenaltyRate { above: 5.0 },
            )
            .with_impact("Disproportionate financial penalties")
            .with_mitigation("Negotiate lower penalty rates and an overall penalty cap"),
            RiskRule::keywords(Financial, "Personal or joint and several liability exposure", 8.0, 0.5)
                .with_any_of(&["personal guarantee", "joint and several"])
                .with_impact("Liability reaching beyond the contracting entity")
                .with_mitigation("Remove personal guarantees and limit liability to the contracting entity"),
            // ============================================================
            // Legal
            // ============================================================
            RiskRule::keywords(Legal, "Potentially unfavorable jurisdiction for dispute resolution", 7.0, 0.2)
                .with_all_of(&["jurisdiction"])
                .with_any_of(&["foreign", "offshore", "international arbitration"])
                .with_impact("Increased legal costs and procedural disadvantages")
                .with_mitigation("Seek neutral jurisdiction or alternative dispute resolution"),
            RiskRule::keywords(Legal, "One-sided indemnification obligations", 6.5, 0.3)
                .with_any_of(&["indemnif"])
                .with_none_of(&["mutual", "reciprocal"])
                .with_impact("Asymmetric legal protection and liability exposure")
                .with_mitigation("Negotiate mutual indemnification provisions"),
            RiskRule::keywords(Legal, "Blanket hold-harmless obligation covering all claims", 9.0, 0.9)
                .with_all_of(&["hold harmless"])
                .with_any_of(&["all claims", "any claims", "any and all"])
                .with_none_of(&["mutual", "reciprocal"])
                .with_impact("Open-ended defence and indemnity costs")
                .with_mitigation("Limit indemnity to third-party claims caused by the indemnifying party"),
            RiskRule::keywords(Legal, "Sole responsibility allocated to one party", 8.5, 0.9)
                .with_any_of(&["solely responsible", "solely liable", "exclusively liable", "sole liability", "bears all costs"])
                .with_none_of(&["mutual"])
                .with_impact("Asymmetric liability allocation")
                .with_mitigation("Allocate responsibility in proportion to fault"),
            RiskRule::keywords(Legal, "Broad warranty obligations without disclaimers", 5.5, 0.4)
                .with_any_of(&["warrant", "guarantee"])
                .with_none_of(&["disclaim"])
                .with_impact("Potential warranty claims and associated costs")
                .with_mitigation("Add warranty disclaimers and limitations"),
            RiskRule::keywords(Legal, "Termination for convenience without cure period", 6.0, 0.25)
                .with_all_of(&["terminat", "convenience"])
                .with_none_of(&["cure"])
                .with_impact("Risk of abrupt contract termination")
                .with_mitigation("Require notice and cure periods before termination"),
            // ============================================================
            // Operational
            // ============================================================
            RiskRule::new(
                Operational,
                "Tight timeline of {amount} {unit} may be unrealistic",
                5.0,
                0.5,
                RiskCheck::TightTimeline { under_days: 3.0 },
            )
            .with_impact("Risk of delivery delays and penalty exposure")
            .with_mitigation("Request realistic deadlines with force majeure protection"),
            RiskRule::keywords(Operational, "Vague deliverable specifications may lead to scope disputes", 6.0, 0.4)
                .with_any_of(&["deliverable"])
                .with_none_of(&["specific"])
                .with_impact("Scope creep and delivery disagreements")
                .with_mitigation("Demand detailed specifications and acceptance criteria"),
            RiskRule::keywords(Operational, "Third-party dependencies create operational risks", 4.5, 0.3)
                .with_any_of(&["depend", "third party"])
                .with_impact("Potential delays due to external factors")
                .with_mitigation("Add schedule relief for third-party delays"),
            // ============================================================
            // Compliance
            // ============================================================
            RiskRule::keywords(Compliance, "Compliance obligations may not reflect current regulations", 6.5, 0.3)
                .with_any_of(&["regulation", "compliance", "law"])
                .with_none_of(&["current"])
                .with_impact("Regulatory violations and associated penalties")
                .with_mitigation("Reference current applicable regulations explicitly"),
            RiskRule::keywords(Compliance, "Data handling without explicit privacy protections", 7.0, 0.4)
                .with_any_of(&["data"])
                .with_none_of(&["gdpr", "privacy"])
                .with_impact("Privacy violations and regulatory fines")
                .with_mitigation("Add data protection and privacy obligations"),
            RiskRule::keywords(Compliance, "Financial operations without AML/CTF compliance measures", 5.5, 0.2)
                .with_any_of(&["payment", "financial", "money"])
                .with_none_of(&["aml"])
                .with_impact("Anti-money laundering compliance issues")
                .with_mitigation("Add AML/CTF compliance representations"),
            // ============================================================
            // Reputational
            // ============================================================
            RiskRule::keywords(Reputational, "Public disclosure without confidentiality protections", 5.0, 0.3)
                .with_any_of(&["public", "disclosure"])
                .with_none_of(&["confidential"])
                .with_impact("Potential reputation damage from public exposure")
                .with_mitigation("Add confidentiality and publicity approval requirements"),
            RiskRule::keywords(Reputational, "Quality expectations without defined standards", 4.0, 0.4)
                .with_any_of(&["quality"])
                .with_none_of(&["standard"])
                .with_impact("Risk of quality disputes affecting reputation")
                .with_mitigation("Define measurable quality standards"),
            // ============================================================
            // Strategic
            // ============================================================
            RiskRule::keywords(Strategic, "IP transfer without license-back rights", 7.5, 0.2)
                .with_any_of(&["intellectual property", "copyright"])
                .with_none_of(&["license back", "retain"])
                .with_impact("Loss of strategic IP assets and future licensing opportunities")
                .with_mitigation("Negotiate license-back or retained rights"),
            RiskRule::keywords(Strategic, "Indefinite exclusivity arrangements", 6.0, 0.25)
                .with_any_of(&["exclusive"])
                .with_none_of(&["term"])
                .with_impact("Strategic flexibility limitations")
                .with_mitigation("Limit exclusivity to a defined term and territory"),
            RiskRule::keywords(Strategic, "Perpetual or irrevocable commitments", 6.5, 0.3)
                .with_any_of(&["in perpetuity", "irrevocable", "perpetual"])
                .with_impact("Commitments that outlive the commercial relationship")
                .with_mitigation("Add term limits or revocation rights"),
        ])
    }
}
