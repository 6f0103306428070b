//! Property tests for the admission engine.
//!
//! Covers tier monotonicity, repeatable evaluation, the estimate's lower
//! bound and exact behaviour at the per-item and per-period boundaries.

use proptest::prelude::*;

use study_gate::domain::admission::{
    ActionRequest, AdmissionEngine, ArtifactInput, ArtifactKind, ChatTurn, DenialReason,
    MediaKind, SourceDescriptor, TokenEstimator,
};
use study_gate::domain::plan::{PlanLimits, PlanTier, TaskKind};
use study_gate::domain::usage::UsageSnapshot;

// =============================================================================
// Strategies
// =============================================================================

fn media_kind() -> impl Strategy<Value = MediaKind> {
    prop_oneof![
        Just(MediaKind::Text),
        Just(MediaKind::WebPage),
        Just(MediaKind::Transcript),
        Just(MediaKind::Pdf),
        Just(MediaKind::Epub),
        Just(MediaKind::Video),
        Just(MediaKind::Audio),
    ]
}

fn source() -> impl Strategy<Value = SourceDescriptor> {
    (
        media_kind(),
        0u64..2_000_000,
        proptest::option::of(0u32..600),
        proptest::option::of(0u32..300),
    )
        .prop_map(|(media, len, pages, minutes)| SourceDescriptor {
            media,
            content_length: len,
            pages,
            minutes,
        })
}

fn chat_turn() -> impl Strategy<Value = ChatTurn> {
    (any::<bool>(), "[a-z ]{0,400}").prop_map(|(user, text)| {
        if user {
            ChatTurn::user(text)
        } else {
            ChatTurn::assistant(text)
        }
    })
}

fn request() -> impl Strategy<Value = ActionRequest> {
    prop_oneof![
        prop::collection::vec(source(), 1..25)
            .prop_map(|sources| ActionRequest::CreateItem { sources }),
        (prop::collection::vec(chat_turn(), 0..10), "[a-z ]{1,2000}")
            .prop_map(|(history, message)| ActionRequest::GenerateChatReply { history, message }),
        Just(ActionRequest::RunWebLookup),
        (0u32..200).prop_map(|minutes| ActionRequest::StreamIngest { minutes }),
        (any::<bool>(), "[a-z ]{1,5000}").prop_map(|(quiz, text)| ActionRequest::DeriveArtifact {
            artifact: if quiz { ArtifactKind::Quiz } else { ArtifactKind::Flashcards },
            input: ArtifactInput::Text(text),
        }),
        (any::<bool>(), prop::collection::vec(source(), 1..5)).prop_map(|(quiz, sources)| {
            ActionRequest::DeriveArtifact {
                artifact: if quiz { ArtifactKind::Quiz } else { ArtifactKind::Flashcards },
                input: ArtifactInput::Sources(sources),
            }
        }),
    ]
}

fn snapshot() -> impl Strategy<Value = UsageSnapshot> {
    (
        0u64..150,
        0u64..1_200,
        0u64..250,
        0u64..2_500,
        0u64..25_000_000,
        0u64..45_000_000,
    )
        .prop_map(|(items, minutes, lookups, messages, tokens, chat_tokens)| UsageSnapshot {
            items_created: items,
            stream_minutes_used: minutes,
            web_lookups_used: lookups,
            chat_messages_used: messages,
            tokens_used_total: tokens,
            chat_tokens_used: chat_tokens,
        })
}

fn tier() -> impl Strategy<Value = PlanTier> {
    prop_oneof![Just(PlanTier::Free), Just(PlanTier::Starter), Just(PlanTier::Pro)]
}

fn ceil_div4(chars: u64) -> u64 {
    chars / 4 + u64::from(chars % 4 != 0)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn higher_tier_never_denies_what_lower_tier_allows(
        snapshot in snapshot(),
        request in request(),
    ) {
        let engine = AdmissionEngine::standard();
        for pair in PlanTier::ALL.windows(2) {
            let lower = engine.evaluate(pair[0], &snapshot, &request);
            let higher = engine.evaluate(pair[1], &snapshot, &request);
            prop_assert!(
                !(lower.is_allowed() && higher.is_denied()),
                "{:?} allowed but {:?} denied with {:?}",
                pair[0], pair[1], higher.reason
            );
        }
    }

    #[test]
    fn evaluation_is_idempotent(
        tier in tier(),
        snapshot in snapshot(),
        request in request(),
    ) {
        let engine = AdmissionEngine::standard();
        let first = engine.evaluate(tier, &snapshot, &request);
        let second = engine.evaluate(tier, &snapshot, &request);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn estimate_is_at_least_the_input_cost(chars in 0u64..10_000_000, tier in tier()) {
        let estimator = TokenEstimator::default();
        let limits = AdmissionEngine::standard().catalog().limits_for(tier).clone();
        for kind in TaskKind::ALL {
            let estimate = estimator.estimate(chars, &limits, kind);
            prop_assert!(estimate >= ceil_div4(chars));
            prop_assert_eq!(estimate, ceil_div4(chars) + limits.output_tokens_for(kind));
        }
    }

    #[test]
    fn denial_always_carries_a_reason(
        tier in tier(),
        snapshot in snapshot(),
        request in request(),
    ) {
        let decision = AdmissionEngine::standard().evaluate(tier, &snapshot, &request);
        prop_assert_eq!(decision.is_denied(), decision.reason.is_some());
        if decision.is_allowed() {
            prop_assert!(decision.remediation.is_none());
        }
    }

    #[test]
    fn token_costed_actions_carry_an_estimate_when_allowed(
        tier in tier(),
        snapshot in snapshot(),
        request in request(),
    ) {
        let decision = AdmissionEngine::standard().evaluate(tier, &snapshot, &request);
        let token_costed = matches!(
            request,
            ActionRequest::CreateItem { .. }
                | ActionRequest::GenerateChatReply { .. }
                | ActionRequest::DeriveArtifact { .. }
        );
        if decision.is_allowed() {
            prop_assert_eq!(decision.estimated_tokens.is_some(), token_costed);
        }
    }
}

// =============================================================================
// Boundaries
// =============================================================================

/// Characters whose guide estimate on `limits` is exactly `target` tokens.
fn chars_for_guide_estimate(limits: &PlanLimits, target: u64) -> u64 {
    (target - limits.output_tokens_for(TaskKind::Guide)) * 4
}

#[test]
fn item_at_exact_ceiling_is_allowed_on_every_tier() {
    let engine = AdmissionEngine::standard();
    for tier in PlanTier::ALL {
        let limits = engine.catalog().limits_for(tier);
        let chars = chars_for_guide_estimate(limits, limits.max_tokens_per_item);

        let at = engine.evaluate(
            tier,
            &UsageSnapshot::empty(),
            &ActionRequest::CreateItem {
                sources: vec![SourceDescriptor::text(chars)],
            },
        );
        assert!(at.is_allowed(), "{:?} should allow exact ceiling", tier);
        assert_eq!(at.estimated_tokens, Some(limits.max_tokens_per_item));

        let over = engine.evaluate(
            tier,
            &UsageSnapshot::empty(),
            &ActionRequest::CreateItem {
                sources: vec![SourceDescriptor::text(chars + 1)],
            },
        );
        assert_eq!(over.reason, Some(DenialReason::ItemTooLarge), "{:?}", tier);
        assert_eq!(over.estimated_tokens, Some(limits.max_tokens_per_item + 1));
    }
}

#[test]
fn item_count_boundary_on_every_tier() {
    let engine = AdmissionEngine::standard();
    let request = ActionRequest::CreateItem {
        sources: vec![SourceDescriptor::text(1_000)],
    };
    for tier in PlanTier::ALL {
        let max = engine.catalog().limits_for(tier).max_items_per_period;

        let below = UsageSnapshot {
            items_created: max - 1,
            ..UsageSnapshot::default()
        };
        assert!(engine.evaluate(tier, &below, &request).is_allowed());

        let at = UsageSnapshot {
            items_created: max,
            ..UsageSnapshot::default()
        };
        assert_eq!(
            engine.evaluate(tier, &at, &request).reason,
            Some(DenialReason::PeriodCountExhausted)
        );
    }
}
