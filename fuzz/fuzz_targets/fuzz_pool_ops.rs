#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use protopool_core::{
    CloneLifecycle, Handle, PoolOptions, PrototypePool, TemplateKey, TemplateSource, Tier,
};

const KEY_SPACE: u64 = 16;

#[derive(Arbitrary, Debug)]
enum Op {
    Register { key: u8, tier: u8 },
    Acquire { key: u8 },
    Release { slot: u8 },
    Unregister { key: u8 },
    MarkSingle { key: u8 },
    RequestReclaim { ceiling: u8 },
    Drain { max: u8 },
    ForceClear { key: u8 },
    Advance { millis: u16 },
    Sample { mib: u16 },
}

fn key(raw: u8) -> TemplateKey {
    TemplateKey(u64::from(raw) % KEY_SPACE)
}

fuzz_target!(|ops: Vec<Op>| {
    let mut pool = PrototypePool::new(CloneLifecycle, PoolOptions::default());
    // Handles are deliberately kept across unregister/force_clear so stale
    // releases exercise the foreign-handle rejection path.
    let mut held: Vec<Handle> = Vec::new();
    let mut now = Duration::ZERO;

    for op in ops {
        match op {
            Op::Register { key: k, tier } => {
                pool.register(
                    key(k),
                    TemplateSource::Owned(vec![0u8; 8]),
                    Tier::new(tier),
                );
            }
            Op::Acquire { key: k } => {
                if let Some(handle) = pool.acquire(key(k)) {
                    held.push(handle);
                }
            }
            Op::Release { slot } => {
                if !held.is_empty() {
                    let handle = held.swap_remove(usize::from(slot) % held.len());
                    pool.release(handle, now);
                }
            }
            Op::Unregister { key: k } => pool.unregister(key(k)),
            Op::MarkSingle { key: k } => {
                let _ = pool.mark_single(key(k), now);
            }
            Op::RequestReclaim { ceiling } => pool.request_reclaim(Tier::new(ceiling)),
            Op::Drain { max } => {
                let _ = pool.drain(usize::from(max) % 8);
            }
            Op::ForceClear { key: k } => {
                let _ = pool.force_clear(key(k));
            }
            Op::Advance { millis } => now += Duration::from_millis(u64::from(millis)),
            Op::Sample { mib } => pool.sample_and_trigger(f64::from(mib), now),
        }

        // Every live instance sits in exactly one of {active, free}.
        for k in 0..KEY_SPACE {
            let k = TemplateKey(k);
            assert_eq!(
                pool.free_count(k) + pool.active_count(k),
                pool.instance_count(k)
            );
        }
    }

    pool.clear_all();
    assert_eq!(pool.template_count(), 0);
    assert_eq!(pool.pending_len(), 0);
});
