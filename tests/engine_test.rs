// tests/engine_test.rs
use bump_version::domain::{
    available_targets, next_version, Channel, ReleaseRequest, ReleaseSize, ReleaseTarget,
    VersionParts,
};

fn next(current: &str, size: ReleaseSize, pre: bool, channel: Option<Channel>) -> String {
    next_version(current, size, pre, channel).unwrap()
}

#[test]
fn test_parse_prerelease() {
    let parts = VersionParts::parse("1.0.0a0").unwrap();
    assert_eq!((parts.major, parts.minor, parts.patch), (1, 0, 0));
    assert_eq!(parts.prerelease_type(), Some(Channel::Alpha));
    assert_eq!(parts.prerelease_num(), Some(0));
}

#[test]
fn test_parse_requires_three_part_core() {
    assert!(VersionParts::parse("1.2").unwrap_err().is_parse_failure());
    assert!(VersionParts::parse("1.2.3.4").unwrap_err().is_parse_failure());
}

#[test]
fn test_final_bumps_reset_lower_components() {
    for (major, minor, patch) in [(0, 0, 0), (1, 2, 3), (10, 0, 9), (3, 14, 159)] {
        let current = format!("{}.{}.{}", major, minor, patch);
        assert_eq!(
            next(&current, ReleaseSize::Patch, false, None),
            format!("{}.{}.{}", major, minor, patch + 1)
        );
        assert_eq!(
            next(&current, ReleaseSize::Minor, false, None),
            format!("{}.{}.0", major, minor + 1)
        );
        assert_eq!(
            next(&current, ReleaseSize::Major, false, None),
            format!("{}.0.0", major + 1)
        );
    }
}

#[test]
fn test_concrete_scenarios() {
    assert_eq!(next("1.0.0", ReleaseSize::Patch, true, Some(Channel::Alpha)), "1.0.1a0");
    assert_eq!(next("1.0.0a0", ReleaseSize::Patch, true, Some(Channel::Alpha)), "1.0.0a1");
    assert_eq!(next("1.0.0a3", ReleaseSize::Patch, true, Some(Channel::Beta)), "1.0.0b0");
    assert_eq!(next("1.0.0rc1", ReleaseSize::Patch, false, None), "1.0.0");
    assert_eq!(next("1.0.0", ReleaseSize::Patch, true, Some(Channel::Post)), "1.0.0.post0");
    assert_eq!(next("1.0.0", ReleaseSize::Major, true, Some(Channel::Post)), "1.0.0.post0");
}

#[test]
fn test_prerelease_to_post_rejected_for_any_counter() {
    for counter in [0, 1, 7, 42] {
        let current = format!("1.0.0a{}", counter);
        let err = next_version(&current, ReleaseSize::Patch, true, Some(Channel::Post)).unwrap_err();
        assert!(err.is_transition_rejected());
        assert!(err.to_string().contains("release a final version first"));
    }
}

#[test]
fn test_post_to_channel_rejected() {
    let err = next_version("1.0.0post1", ReleaseSize::Patch, true, Some(Channel::Alpha)).unwrap_err();
    assert!(err.is_transition_rejected());
    assert!(err.to_string().contains("cannot move from post back to a"));
}

#[test]
fn test_same_channel_only_changes_counter() {
    let current = VersionParts::new(2, 3, 4).with_prerelease(Channel::Alpha, 3);
    let next = next_version(&current.to_string(), ReleaseSize::Major, true, Some(Channel::Alpha)).unwrap();
    let parsed = VersionParts::parse(&next).unwrap();
    assert_eq!(parsed.core(), "2.3.4");
    assert_eq!(parsed.prerelease, Some((Channel::Alpha, 4)));
}

#[test]
fn test_results_reparse_to_intended_channel() {
    let starts = ["1.0.0", "0.9.9", "1.0.0.dev2", "1.0.0a1", "1.0.0b4", "1.0.0rc1", "1.0.0.post3"];

    for start in starts {
        let current = VersionParts::parse(start).unwrap();
        for target in available_targets(&current) {
            for size in ReleaseSize::ALL {
                let request = ReleaseRequest::for_target(size, target);
                let next = next_version(start, size, request.prerelease, request.channel).unwrap();
                let parsed = VersionParts::parse(&next).unwrap();

                match target {
                    ReleaseTarget::Final => assert!(parsed.is_final(), "{} -> {}", start, next),
                    ReleaseTarget::Channel(channel) => {
                        assert_eq!(parsed.prerelease_type(), Some(channel), "{} -> {}", start, next);
                        let expected = match current.prerelease {
                            Some((from, counter)) if from == channel => counter + 1,
                            _ => 0,
                        };
                        assert_eq!(parsed.prerelease_num(), Some(expected), "{} -> {}", start, next);
                    }
                }
            }
        }
    }
}

#[test]
fn test_post_to_final_bumps_core() {
    assert_eq!(next("1.0.0.post2", ReleaseSize::Patch, false, None), "1.0.1");
    assert_eq!(next("1.0.0.post2", ReleaseSize::Minor, false, None), "1.1.0");
}

#[test]
fn test_leading_v_and_local_label() {
    assert_eq!(next("v1.2.3", ReleaseSize::Patch, false, None), "1.2.4");
    assert_eq!(next("1.2.3+build.7", ReleaseSize::Patch, false, None), "1.2.4");
}

#[test]
fn test_core_overflow_is_an_error() {
    let max = u64::MAX;
    let cases = [
        (format!("1.0.{}", max), ReleaseSize::Patch),
        (format!("1.{}.0", max), ReleaseSize::Minor),
        (format!("{}.0.0", max), ReleaseSize::Major),
    ];

    for (current, size) in cases {
        assert!(VersionParts::parse(&current).is_ok());
        let err = next_version(&current, size, false, None).unwrap_err();
        assert!(err.is_parse_failure(), "{}", current);
        assert!(err.to_string().contains("cannot be incremented"));

        let err = next_version(&current, size, true, Some(Channel::Alpha)).unwrap_err();
        assert!(err.is_parse_failure(), "{}", current);
    }

    // Post to final bumps the core as well
    let current = format!("1.0.{}.post0", max);
    assert!(next_version(&current, ReleaseSize::Patch, false, None).is_err());
}

#[test]
fn test_counter_overflow_is_an_error() {
    let max = u64::MAX;

    let current = format!("1.0.0a{}", max);
    let err = next_version(&current, ReleaseSize::Patch, true, Some(Channel::Alpha)).unwrap_err();
    assert!(err.is_parse_failure());
    assert!(err.to_string().contains("release counter cannot be incremented"));

    let current = format!("1.0.0.post{}", max);
    assert!(next_version(&current, ReleaseSize::Patch, true, Some(Channel::Post)).is_err());

    // Leaving the channel does not touch the counter
    assert_eq!(
        next(&format!("1.0.0a{}", max), ReleaseSize::Patch, true, Some(Channel::Beta)),
        "1.0.0b0"
    );
}

#[test]
fn test_downgrade_is_accepted_and_detected() {
    use bump_version::domain::{is_channel_downgrade, next_from_parts};

    let current = VersionParts::parse("1.0.0b2").unwrap();
    let request = ReleaseRequest::on_channel(ReleaseSize::Patch, Channel::Alpha);

    assert_eq!(next_from_parts(&current, &request).unwrap(), "1.0.0a0");
    assert!(is_channel_downgrade(Channel::Beta, Channel::Alpha));
    assert!(!available_targets(&current).contains(&ReleaseTarget::Channel(Channel::Alpha)));
}
