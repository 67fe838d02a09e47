//! Property tests for the debounce gate's noise-rejection laws.

use proptest::prelude::*;

use gaze_playback::{DebounceGate, StableSignal, Verdict};

fn verdict_strategy() -> impl Strategy<Value = Verdict> {
    prop_oneof![
        Just(Verdict::Attentive),
        Just(Verdict::Inattentive),
        Just(Verdict::NoFace),
    ]
}

fn sequences() -> impl Strategy<Value = Vec<Verdict>> {
    proptest::collection::vec(verdict_strategy(), 0..120)
}

fn target_of(verdict: Verdict) -> StableSignal {
    match verdict {
        Verdict::Attentive => StableSignal::Looking,
        Verdict::Inattentive | Verdict::NoFace => StableSignal::NotLooking,
    }
}

proptest! {
    /// 任何翻转之前，最近 streak 帧的目标必须全部等于新信号
    #[test]
    fn pt_flip_requires_full_streak(seq in sequences(), streak in 1u32..6) {
        let mut gate = DebounceGate::new(streak);
        let mut targets: Vec<StableSignal> = Vec::with_capacity(seq.len());
        let mut prev = gate.signal();

        for (i, verdict) in seq.iter().enumerate() {
            targets.push(target_of(*verdict));
            let now = gate.update(*verdict);
            if now != prev {
                prop_assert!(i + 1 >= streak as usize, "flip before {streak} ticks elapsed");
                for k in 0..streak as usize {
                    prop_assert_eq!(targets[i - k], now);
                }
            }
            prev = now;
        }
    }

    /// streak >= 2 时，单帧异议永远不会翻转信号
    #[test]
    fn pt_single_dissenting_tick_never_flips(seq in sequences(), streak in 2u32..6) {
        let mut gate = DebounceGate::new(streak);
        for verdict in &seq {
            gate.update(*verdict);
        }

        // 先用与当前信号一致的判定对齐计数器，再注入单帧异议
        let signal = gate.signal();
        let agree = match signal {
            StableSignal::Looking => Verdict::Attentive,
            StableSignal::NotLooking => Verdict::NoFace,
        };
        for _ in 0..streak {
            prop_assert_eq!(gate.update(agree), signal);
        }

        let dissent = match signal {
            StableSignal::Looking => Verdict::NoFace,
            StableSignal::NotLooking => Verdict::Attentive,
        };
        prop_assert_eq!(gate.update(dissent), signal);
    }

    /// 在处理满 streak 帧之前，信号保持初始的 NotLooking
    #[test]
    fn pt_no_flip_before_streak_ticks(seq in sequences(), streak in 1u32..6) {
        let mut gate = DebounceGate::new(streak);
        for (i, verdict) in seq.iter().enumerate() {
            let signal = gate.update(*verdict);
            if (i as u32) + 1 < streak {
                prop_assert_eq!(signal, StableSignal::NotLooking);
            } else {
                break;
            }
        }
    }

    /// 与当前信号一致的判定流永远不会改变信号
    #[test]
    fn pt_agreement_is_stable(seq in sequences(), streak in 1u32..6, extra in 1usize..40) {
        let mut gate = DebounceGate::new(streak);
        for verdict in &seq {
            gate.update(*verdict);
        }

        let signal = gate.signal();
        let agree = match signal {
            StableSignal::Looking => Verdict::Attentive,
            StableSignal::NotLooking => Verdict::Inattentive,
        };
        for _ in 0..extra {
            prop_assert_eq!(gate.update(agree), signal);
        }
    }
}
