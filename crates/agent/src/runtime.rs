use serde::{Deserialize, Serialize};
use stampy_core::{
    BuyerType, BuyerTypeComparison, CalculationResult, Calculator, Region, RegionComparison,
};

use crate::intent::{IntentExtractor, QueryIntent};
use crate::reply;

/// What a reply was built from, for callers that want the figures rather
/// than the prose.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplyOutcome {
    Calculation(CalculationResult),
    BuyerComparison(BuyerTypeComparison),
    RegionComparison(RegionComparison),
    Clarification,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReply {
    pub text: String,
    pub outcome: ReplyOutcome,
}

/// Dispatches a parsed question to the calculator:
/// - no price: ask for one
/// - two or more regions named: cross-region comparison
/// - comparison wording: buyer-type comparison
/// - otherwise: a single calculation, defaulting to England and a standard
///   buyer where the question left them out
#[derive(Clone, Debug, Default)]
pub struct AgentRuntime {
    extractor: IntentExtractor,
    calculator: Calculator,
}

impl AgentRuntime {
    pub fn new(calculator: Calculator) -> Self {
        Self { extractor: IntentExtractor::new(), calculator }
    }

    pub fn handle_message(&self, text: &str) -> AgentReply {
        let intent = self.extractor.extract(text);
        self.respond(&intent)
    }

    pub fn respond(&self, intent: &QueryIntent) -> AgentReply {
        let Some(price) = intent.price else {
            let text = intent.clarification_prompt.clone().unwrap_or_else(|| {
                "I need a purchase price to work anything out.".to_string()
            });
            return AgentReply { text, outcome: ReplyOutcome::Clarification };
        };

        let buyer_type = intent.buyer_type.unwrap_or(BuyerType::Standard);

        if intent.regions.len() >= 2 {
            let comparison = self.calculator.compare_regions(price, buyer_type);
            return AgentReply {
                text: reply::region_comparison_message(&comparison),
                outcome: ReplyOutcome::RegionComparison(comparison),
            };
        }

        let region = intent.regions.first().copied().unwrap_or(Region::England);

        if intent.wants_comparison {
            let comparison = self.calculator.compare_buyer_types(price, region);
            return AgentReply {
                text: reply::buyer_comparison_message(&comparison),
                outcome: ReplyOutcome::BuyerComparison(comparison),
            };
        }

        let result = self.calculator.calculate(price, region, buyer_type);
        AgentReply {
            text: reply::calculation_message(&result),
            outcome: ReplyOutcome::Calculation(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use stampy_core::{BuyerType, Region};

    use super::{AgentReply, AgentRuntime, ReplyOutcome};

    fn runtime() -> AgentRuntime {
        AgentRuntime::default()
    }

    #[test]
    fn a_full_question_yields_a_calculation() {
        let reply = runtime().handle_message("stamp duty on a £450,000 second home in wales");

        match reply.outcome {
            ReplyOutcome::Calculation(result) => {
                assert_eq!(result.purchase_price, dec!(450000));
                assert_eq!(result.region, Region::Wales);
                assert_eq!(result.buyer_type, BuyerType::Additional);
                assert_eq!(result.total_tax, dec!(32250));
            }
            other => panic!("expected a calculation, got {other:?}"),
        }
        assert!(reply.text.contains("£32,250"));
    }

    #[test]
    fn replies_serialize_with_a_tagged_outcome() {
        let reply = runtime().handle_message("stamp duty on a £450,000 second home in wales");

        let payload = serde_json::to_value(&reply).unwrap();
        assert_eq!(payload["outcome"]["kind"], "calculation");
        assert_eq!(payload["outcome"]["region"], "wales");
        assert!(payload["outcome"]["total_tax"].is_string());

        let roundtrip: AgentReply = serde_json::from_value(payload).unwrap();
        assert_eq!(roundtrip, reply);
    }

    #[test]
    fn missing_price_asks_for_one() {
        let reply = runtime().handle_message("how much tax would I pay in scotland?");

        assert_eq!(reply.outcome, ReplyOutcome::Clarification);
        assert!(reply.text.contains("price"));
    }

    #[test]
    fn naming_two_regions_compares_them() {
        let reply = runtime().handle_message("england vs wales for a 500k house");

        match reply.outcome {
            ReplyOutcome::RegionComparison(comparison) => {
                assert_eq!(comparison.purchase_price, dec!(500000));
                assert_eq!(comparison.totals.len(), 3);
            }
            other => panic!("expected a region comparison, got {other:?}"),
        }
    }

    #[test]
    fn comparison_wording_compares_buyer_types() {
        let reply = runtime().handle_message("compare buyer types at 500000 in england");

        match reply.outcome {
            ReplyOutcome::BuyerComparison(comparison) => {
                assert_eq!(comparison.region, Region::England);
                assert_eq!(comparison.first_time_savings, dec!(8750));
            }
            other => panic!("expected a buyer comparison, got {other:?}"),
        }
    }

    #[test]
    fn region_and_buyer_default_when_unnamed() {
        let reply = runtime().handle_message("what do I owe on a 500k purchase?");

        match reply.outcome {
            ReplyOutcome::Calculation(result) => {
                assert_eq!(result.region, Region::England);
                assert_eq!(result.buyer_type, BuyerType::Standard);
                assert_eq!(result.total_tax, dec!(12500));
            }
            other => panic!("expected a calculation, got {other:?}"),
        }
    }
}
