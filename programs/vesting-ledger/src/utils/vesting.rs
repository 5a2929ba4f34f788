//! Linear unlock math.
//!
//! `vested = allocated * clamp(now - start, 0, duration) / duration` with
//! floor division: zero before the schedule starts, the full allocation at
//! or after the end, monotone non-decreasing in between. The releasable
//! amount additionally caps the unlocked remainder to the funds the ledger
//! actually holds.

use crate::error::LedgerError;

/// Amount of `allocated` vested at `now_ts`.
pub fn vested_amount(
    allocated: u64,
    now_ts: i64,
    start_ts: i64,
    duration_secs: i64,
) -> Result<u64, LedgerError> {
    if duration_secs <= 0 {
        return Err(LedgerError::InvalidConfig);
    }
    if now_ts <= start_ts {
        return Ok(0);
    }
    let elapsed = now_ts
        .checked_sub(start_ts)
        .ok_or(LedgerError::MathOverflow)?;
    if elapsed >= duration_secs {
        return Ok(allocated);
    }
    let v = (allocated as u128)
        .checked_mul(elapsed as u128)
        .ok_or(LedgerError::MathOverflow)?
        / (duration_secs as u128);
    u64::try_from(v).map_err(|_| LedgerError::MathOverflow)
}

/// Vested-but-unreleased amount, capped by `available_funds`
/// (net donations minus everything already released).
pub fn releasable_amount(
    allocated: u64,
    released: u64,
    available_funds: u64,
    now_ts: i64,
    start_ts: i64,
    duration_secs: i64,
) -> Result<u64, LedgerError> {
    let vested = vested_amount(allocated, now_ts, start_ts, duration_secs)?;
    let unlocked = vested
        .checked_sub(released)
        .ok_or(LedgerError::MathOverflow)?;
    Ok(unlocked.min(available_funds))
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: i64 = 1_000_000;
    const DURATION: i64 = 1_000;

    #[test]
    fn zero_before_start_and_full_after_end() {
        assert_eq!(vested_amount(10, START - 1, START, DURATION).unwrap(), 0);
        assert_eq!(vested_amount(10, START, START, DURATION).unwrap(), 0);
        assert_eq!(
            vested_amount(10, START + DURATION, START, DURATION).unwrap(),
            10
        );
        assert_eq!(
            vested_amount(10, START + DURATION * 10, START, DURATION).unwrap(),
            10
        );
    }

    #[test]
    fn linear_unlock_with_floor_division() {
        // 10 allocated, 600 of 1000 seconds elapsed: floor(10*600/1000) = 6.
        assert_eq!(vested_amount(10, START + 600, START, DURATION).unwrap(), 6);
        // Floor: 10 * 50 / 1000 = 0.5 rounds down.
        assert_eq!(vested_amount(10, START + 50, START, DURATION).unwrap(), 0);
        assert_eq!(vested_amount(10, START + 150, START, DURATION).unwrap(), 1);
    }

    #[test]
    fn vested_is_monotone_in_now() {
        let mut prev = 0;
        for now in (START - 100..=START + DURATION + 100).step_by(7) {
            let v = vested_amount(123_456_789, now, START, DURATION).unwrap();
            assert!(v >= prev, "vested decreased at now={now}");
            prev = v;
        }
        assert_eq!(prev, 123_456_789);
    }

    #[test]
    fn releasable_capped_by_available_funds() {
        // Fully vested 100 with only 5 donated: release yields 5, not 100.
        let amount = releasable_amount(100, 0, 5, START + DURATION, START, DURATION).unwrap();
        assert_eq!(amount, 5);

        // Plenty of funds: the schedule is the binding cap.
        let amount = releasable_amount(10, 0, 25, START + 600, START, DURATION).unwrap();
        assert_eq!(amount, 6);
    }

    #[test]
    fn release_is_idempotent_at_fixed_now() {
        let now = START + 600;
        let first = releasable_amount(10, 0, 25, now, START, DURATION).unwrap();
        assert_eq!(first, 6);
        // Same instant, released updated: nothing further to release.
        let second = releasable_amount(10, first, 25 - first, now, START, DURATION).unwrap();
        assert_eq!(second, 0);
    }

    #[test]
    fn large_allocations_do_not_overflow() {
        let v = vested_amount(u64::MAX, START + 600, START, DURATION).unwrap();
        assert_eq!(v, (u64::MAX as u128 * 600 / 1_000) as u64);
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        assert!(matches!(
            vested_amount(10, START, START, 0),
            Err(LedgerError::InvalidConfig)
        ));
        assert!(matches!(
            vested_amount(10, START, START, -5),
            Err(LedgerError::InvalidConfig)
        ));
    }
}
