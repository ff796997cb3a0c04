use log::{info, warn};
use rand::seq::index;
use rand::Rng;

pub use crate::config::*;

/// The smallest OTP that can be generated.
pub const OTP_MIN: u32 = 1000;
/// The largest OTP that can be generated.
pub const OTP_MAX: u32 = 9999;
/// The number of distinct 4-digit OTPs.
pub const OTP_CAPACITY: usize = (OTP_MAX - OTP_MIN + 1) as usize;

/// Draws `count` distinct OTPs, without replacement.
///
/// The tokens are 4-digit numbers between 1000 and 9999, in no particular order.
pub fn sample_otps<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Result<Vec<String>, RosterError> {
    check_capacity(count)?;
    let otps = index::sample(rng, OTP_CAPACITY, count)
        .iter()
        .map(|idx| (OTP_MIN + idx as u32).to_string())
        .collect();
    Ok(otps)
}

/// Assigns a unique OTP to every record. The i-th record receives the i-th token drawn.
///
/// Nothing is modified if there are more records than available OTPs.
pub fn assign_otps<R: Rng + ?Sized>(
    records: &mut [MemberRecord],
    rng: &mut R,
) -> Result<(), RosterError> {
    let otps = sample_otps(records.len(), rng)?;
    let num_replaced = records
        .iter()
        .filter(|r| r.otp_password.is_some())
        .count();
    if num_replaced > 0 {
        warn!(
            "assign_otps: replacing the existing OTP of {} members",
            num_replaced
        );
    }
    for (record, otp) in records.iter_mut().zip(otps) {
        record.otp_password = Some(otp);
    }
    info!("assign_otps: assigned {} OTPs", records.len());
    Ok(())
}

fn check_capacity(count: usize) -> Result<(), RosterError> {
    if count > OTP_CAPACITY {
        return Err(RosterError::OtpCapacityExceeded {
            requested: count,
            capacity: OTP_CAPACITY,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn records(n: u32) -> Vec<MemberRecord> {
        (1..=n)
            .map(|sl_no| MemberRecord {
                sl_no,
                ..Default::default()
            })
            .collect()
    }

    fn assert_valid(otps: &[String]) {
        let unique: HashSet<&String> = otps.iter().collect();
        assert_eq!(unique.len(), otps.len());
        for otp in otps {
            assert_eq!(otp.len(), 4);
            let value: u32 = otp.parse().unwrap();
            assert!((OTP_MIN..=OTP_MAX).contains(&value));
        }
    }

    #[test]
    fn three_records() {
        init();
        let mut rng = StdRng::seed_from_u64(1);
        let mut rs = records(3);
        assign_otps(&mut rs, &mut rng).unwrap();
        let otps: Vec<String> = rs.iter().map(|r| r.otp_password.clone().unwrap()).collect();
        assert_valid(&otps);
        // The order of the records is untouched.
        assert_eq!(rs.iter().map(|r| r.sl_no).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn full_capacity() {
        let mut rng = StdRng::seed_from_u64(2);
        let otps = sample_otps(OTP_CAPACITY, &mut rng).unwrap();
        assert_eq!(otps.len(), 9000);
        assert_valid(&otps);
    }

    #[test]
    fn over_capacity_leaves_records_untouched() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut rs = records(9001);
        rs[0].otp_password = Some("1234".to_string());
        assert_eq!(
            assign_otps(&mut rs, &mut rng),
            Err(RosterError::OtpCapacityExceeded {
                requested: 9001,
                capacity: 9000
            })
        );
        assert_eq!(rs[0].otp_password, Some("1234".to_string()));
        assert!(rs[1..].iter().all(|r| r.otp_password.is_none()));
    }

    #[test]
    fn seeded_samples_are_reproducible() {
        let a = sample_otps(50, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = sample_otps(50, &mut StdRng::seed_from_u64(42)).unwrap();
        let c = sample_otps(50, &mut StdRng::seed_from_u64(43)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn replaces_existing_otps() {
        init();
        let mut rng = StdRng::seed_from_u64(4);
        let mut rs = records(2);
        rs[1].otp_password = Some("old".to_string());
        assign_otps(&mut rs, &mut rng).unwrap();
        let otps: Vec<String> = rs.iter().map(|r| r.otp_password.clone().unwrap()).collect();
        assert_valid(&otps);
    }

    #[test]
    fn no_records() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(sample_otps(0, &mut rng), Ok(vec![]));
    }
}
