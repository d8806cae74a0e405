use crate::assessments::banding::{classify_band, classify_tier, BurnoutBand, RiskTier};

#[test]
fn every_total_falls_in_exactly_one_band() {
    for total in 0..=132u16 {
        let matching: Vec<_> = BurnoutBand::ordered()
            .into_iter()
            .filter(|band| band.range().contains(&total))
            .collect();
        assert_eq!(matching.len(), 1, "total {total} matched {matching:?}");
        assert_eq!(classify_band(total), matching[0]);
    }
}

#[test]
fn every_total_falls_in_exactly_one_tier() {
    for total in 0..=132u16 {
        let matching: Vec<_> = RiskTier::ordered()
            .into_iter()
            .filter(|tier| tier.range().contains(&total))
            .collect();
        assert_eq!(matching.len(), 1, "total {total} matched {matching:?}");
        assert_eq!(classify_tier(total), matching[0]);
    }
}

#[test]
fn band_boundaries_are_inclusive_and_contiguous() {
    let boundaries = [
        (22, BurnoutBand::Thriving, BurnoutBand::Balanced),
        (44, BurnoutBand::Balanced, BurnoutBand::Strained),
        (66, BurnoutBand::Strained, BurnoutBand::Overloaded),
        (88, BurnoutBand::Overloaded, BurnoutBand::Exhausted),
        (110, BurnoutBand::Exhausted, BurnoutBand::Critical),
    ];

    for (upper, below, above) in boundaries {
        assert_eq!(classify_band(upper), below, "{upper} closes {below:?}");
        assert_eq!(classify_band(upper + 1), above, "{} opens {above:?}", upper + 1);
    }
    assert_eq!(classify_band(0), BurnoutBand::Thriving);
    assert_eq!(classify_band(132), BurnoutBand::Critical);
}

#[test]
fn tier_boundaries_follow_reporting_thresholds() {
    assert_eq!(classify_tier(0), RiskTier::Low);
    assert_eq!(classify_tier(44), RiskTier::Low);
    assert_eq!(classify_tier(45), RiskTier::Moderate);
    assert_eq!(classify_tier(88), RiskTier::Moderate);
    assert_eq!(classify_tier(89), RiskTier::High);
    assert_eq!(classify_tier(132), RiskTier::High);
}

#[test]
fn totals_above_the_maximum_saturate() {
    assert_eq!(classify_band(500), BurnoutBand::Critical);
    assert_eq!(classify_tier(u16::MAX), RiskTier::High);
}

#[test]
fn bands_are_ordered_and_labelled() {
    let bands = BurnoutBand::ordered();
    assert!(bands.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(bands
        .windows(2)
        .all(|pair| pair[0].range().end() + 1 == *pair[1].range().start()));
    assert_eq!(BurnoutBand::Balanced.label(), "Balanced");
    assert_eq!(RiskTier::Moderate.label(), "Moderate");
}

#[test]
fn classifiers_agree_with_range_endpoints() {
    for band in BurnoutBand::ordered() {
        assert_eq!(classify_band(*band.range().start()), band);
        assert_eq!(classify_band(*band.range().end()), band);
    }
    for tier in RiskTier::ordered() {
        assert_eq!(classify_tier(*tier.range().start()), tier);
        assert_eq!(classify_tier(*tier.range().end()), tier);
    }
    assert_eq!(classify_band(133), BurnoutBand::Critical);
    assert_eq!(classify_tier(133), RiskTier::High);
}
