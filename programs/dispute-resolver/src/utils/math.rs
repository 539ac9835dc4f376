use crate::constants::BPS;

/// `amount * bps / 10_000`, rounded down.
pub fn bps_of(amount: u64, bps: u64) -> Option<u64> {
    let scaled = (amount as u128).checked_mul(bps as u128)?;
    u64::try_from(scaled / BPS as u128).ok()
}

/// Share of `pool` for `power` out of `total_power`, rounded down.
///
/// Rounding always favours the pool, so the sum of all shares never exceeds it
/// and the dust left behind is below the number of claimants.
pub fn pro_rata(power: u64, pool: u64, total_power: u128) -> Option<u64> {
    if total_power == 0 {
        return Some(0);
    }
    let numerator = (power as u128).checked_mul(pool as u128)?;
    u64::try_from(numerator / total_power).ok()
}
