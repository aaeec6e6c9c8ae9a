use proptest::prelude::*;
use rasbita_core::*;

fn arb_incident() -> impl Strategy<Value = IncidentCategory> {
    prop_oneof![
        proptest::sample::select(IncidentCategory::known()),
        "[a-z_]{1,12}".prop_map(|code| IncidentCategory::from_code(&code)),
    ]
}

fn arb_device() -> impl Strategy<Value = DeviceType> {
    prop_oneof![
        proptest::sample::select(DeviceType::known()),
        "[a-z_]{1,12}".prop_map(|code| DeviceType::from_code(&code)),
    ]
}

fn arb_data() -> impl Strategy<Value = DataClassification> {
    proptest::sample::select(DataClassification::known())
}

fn arb_usage() -> impl Strategy<Value = UsageFrequency> {
    proptest::sample::select(UsageFrequency::known())
}

fn arb_band() -> impl Strategy<Value = DataLossBand> {
    proptest::sample::select(DataLossBand::known())
}

fn arb_rate() -> impl Strategy<Value = OccurrenceRate> {
    proptest::sample::select(OccurrenceRate::ALL.to_vec())
}

prop_compose! {
    fn arb_input()(
        incident_category in arb_incident(),
        device_type in arb_device(),
        data_classification in arb_data(),
        usage_frequency in arb_usage(),
        data_loss_band in arb_band(),
        occurrence_rate in arb_rate(),
        damaged_device_count in 0u64..1_000,
        extra_devices in 0u64..1_000,
        total_record_count in 0u64..10_000_000,
    ) -> RiskAssessmentInput {
        RiskAssessmentInput {
            incident_category,
            device_type,
            data_classification,
            usage_frequency,
            data_loss_band,
            occurrence_rate,
            damaged_device_count,
            total_device_count: damaged_device_count + extra_devices,
            total_record_count,
            feasibility: Feasibility::default(),
        }
    }
}

// ── Determinism ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn identical_input_gives_identical_result(input in arb_input()) {
        let engine = RiskScoringEngine::default();
        let a = engine.assess(&input);
        let b = engine.assess(&input.clone());
        prop_assert_eq!(a.asset_value.to_bits(), b.asset_value.to_bits());
        prop_assert_eq!(a.net_risk_reduction_benefit.to_bits(), b.net_risk_reduction_benefit.to_bits());
        prop_assert_eq!(a, b);
    }
}

// ── Monotonicity ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn more_damaged_devices_never_lower_asset_value(input in arb_input(), extra in 1u64..500) {
        let engine = RiskScoringEngine::default();
        let mut more = input.clone();
        more.damaged_device_count += extra;
        more.total_device_count += extra;
        prop_assert!(engine.compute_asset_value(&more) >= engine.compute_asset_value(&input));
    }

    #[test]
    fn higher_loss_band_never_lowers_losses(input in arb_input()) {
        let engine = RiskScoringEngine::default();
        let results: Vec<_> = DataLossBand::known()
            .into_iter()
            .map(|band| {
                let mut i = input.clone();
                i.data_loss_band = band;
                engine.assess(&i)
            })
            .collect();

        for pair in results.windows(2) {
            prop_assert!(pair[1].exposure_factor >= pair[0].exposure_factor);
            prop_assert!(pair[1].single_loss_expectancy >= pair[0].single_loss_expectancy);
            prop_assert!(pair[1].annualized_loss_expectancy >= pair[0].annualized_loss_expectancy);
        }
    }
}

// ── NRRB sign ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn nrrb_sign_follows_reduction_vs_cost(
        ale in 0.0f64..1e9,
        residual_ratio in 0.0f64..=1.0,
        acs in 0.0f64..1e9,
    ) {
        let ale_after = ale * residual_ratio;
        let nrrb = RiskScoringEngine::compute_net_risk_reduction_benefit(ale, ale_after, acs);
        let reduction = ale - ale_after;
        if reduction > acs {
            prop_assert!(nrrb > 0.0);
            prop_assert_eq!(SafeguardVerdict::from_nrrb(nrrb), SafeguardVerdict::Justified);
        } else if reduction < acs {
            prop_assert!(nrrb < 0.0);
            prop_assert_eq!(SafeguardVerdict::from_nrrb(nrrb), SafeguardVerdict::NotJustified);
        } else {
            prop_assert!(nrrb.abs() <= 1e-9);
        }
    }

    #[test]
    fn break_even_is_zero(ale in 0.0f64..1e9, residual_ratio in 0.0f64..=1.0) {
        let ale_after = ale * residual_ratio;
        let acs = ale - ale_after;
        let nrrb = RiskScoringEngine::compute_net_risk_reduction_benefit(ale, ale_after, acs);
        prop_assert!(nrrb.abs() <= 1e-9);
    }

    #[test]
    fn result_verdict_matches_nrrb_sign(input in arb_input()) {
        let r = RiskScoringEngine::default().assess(&input);
        let expected = if r.net_risk_reduction_benefit > 0.0 {
            SafeguardVerdict::Justified
        } else if r.net_risk_reduction_benefit < 0.0 {
            SafeguardVerdict::NotJustified
        } else {
            SafeguardVerdict::BreakEven
        };
        prop_assert_eq!(r.verdict(), expected);
    }
}

// ── Tier boundaries ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn priority_tier_matches_bands(score in 0.0f64..200.0) {
        let tier = PriorityTier::from_combined_score(score);
        let expected = if score >= 60.0 {
            PriorityTier::Critical
        } else if score >= 30.0 {
            PriorityTier::High
        } else if score >= 10.0 {
            PriorityTier::Medium
        } else {
            PriorityTier::Low
        };
        prop_assert_eq!(tier, expected);
    }

    #[test]
    fn priority_tier_is_monotonic(a in 0.0f64..200.0, b in 0.0f64..200.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(PriorityTier::from_combined_score(lo) <= PriorityTier::from_combined_score(hi));
    }

    #[test]
    fn overall_tier_never_improves_with_higher_score(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_tier = classify_overall_risk_score(lo).unwrap().tier;
        let hi_tier = classify_overall_risk_score(hi).unwrap().tier;
        // P1 sorts first, so a higher score must not sort after a lower one
        prop_assert!(hi_tier <= lo_tier);
    }

    #[test]
    fn negative_counts_always_rejected(count in i64::MIN..0) {
        let raw = RawAssessmentInput {
            incident_category: Some("ransomware".into()),
            device_type: Some("server".into()),
            data_classification: Some("phi".into()),
            usage_frequency: Some("daily".into()),
            data_loss_band: Some("1_20".into()),
            occurrence_rate: Some(1.0),
            damaged_device_count: Some(count),
            total_device_count: Some(1),
            total_record_count: Some(1),
            feasibility: Feasibility::default(),
        };
        let err = RiskAssessmentInput::try_from(raw).unwrap_err();
        prop_assert_eq!(err.field(), Some("damaged_device_count"));
    }
}
