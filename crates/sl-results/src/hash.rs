//! Content-based hashing for run IDs.

use sha2::{Digest, Sha256};
use sl_project::schema::{BubbleDef, PolicyDef, RunDef};

/// Run id for a set of inputs. The scenario name is deliberately left out so
/// renamed scenarios with identical physics share cached runs.
///
/// Floats are hashed by bit pattern, so NaN and the infinities (which a
/// permissive scenario may carry) all get distinct ids.
pub fn compute_run_id(
    bubble: &BubbleDef,
    run: &RunDef,
    policy: &PolicyDef,
    engine_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    hasher.update(b"bubble");
    hasher.update(bubble.frequency_hz.to_bits().to_le_bytes());
    hasher.update(bubble.pressure_atm.to_bits().to_le_bytes());
    hasher.update(bubble.ambient_radius_mm.to_bits().to_le_bytes());
    update_str(&mut hasher, &bubble.gas);
    update_str(&mut hasher, &bubble.liquid);

    hasher.update(b"run");
    hasher.update((run.steps as u64).to_le_bytes());
    hasher.update((run.record_every as u64).to_le_bytes());

    hasher.update(b"policy");
    hasher.update([
        policy.strict_parameters as u8,
        policy.restart_clock_on_reconfigure as u8,
    ]);

    update_str(&mut hasher, engine_version);

    format!("{:x}", hasher.finalize())
}

// Length prefix keeps ("ab", "c") and ("a", "bc") apart.
fn update_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_stability() {
        let bubble = BubbleDef::default();
        let run = RunDef::default();
        let policy = PolicyDef::default();

        let hash1 = compute_run_id(&bubble, &run, &policy, "v1");
        let hash2 = compute_run_id(&bubble, &run, &policy, "v1");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let run = RunDef::default();
        let policy = PolicyDef::default();

        let argon = BubbleDef::default();
        let xenon = BubbleDef {
            gas: "Xenon".to_string(),
            ..BubbleDef::default()
        };

        assert_ne!(
            compute_run_id(&argon, &run, &policy, "v1"),
            compute_run_id(&xenon, &run, &policy, "v1")
        );
        assert_ne!(
            compute_run_id(&argon, &run, &policy, "v1"),
            compute_run_id(&argon, &run, &policy, "v2")
        );

        let strict = PolicyDef {
            strict_parameters: true,
            ..PolicyDef::default()
        };
        assert_ne!(
            compute_run_id(&argon, &run, &policy, "v1"),
            compute_run_id(&argon, &run, &strict, "v1")
        );
    }

    #[test]
    fn non_finite_inputs_get_distinct_ids() {
        let run = RunDef::default();
        let policy = PolicyDef::default();
        let with_radius = |ambient_radius_mm: f64| BubbleDef {
            ambient_radius_mm,
            ..BubbleDef::default()
        };

        let nan = compute_run_id(&with_radius(f64::NAN), &run, &policy, "v1");
        let inf = compute_run_id(&with_radius(f64::INFINITY), &run, &policy, "v1");
        let neg_inf = compute_run_id(&with_radius(f64::NEG_INFINITY), &run, &policy, "v1");

        assert_ne!(nan, inf);
        assert_ne!(inf, neg_inf);
        assert_ne!(nan, neg_inf);
    }

    #[test]
    fn labels_do_not_bleed_into_each_other() {
        let run = RunDef::default();
        let policy = PolicyDef::default();
        let ab = BubbleDef {
            gas: "Ar".to_string(),
            liquid: "gon".to_string(),
            ..BubbleDef::default()
        };
        let a = BubbleDef {
            gas: "Argon".to_string(),
            liquid: String::new(),
            ..BubbleDef::default()
        };
        assert_ne!(
            compute_run_id(&ab, &run, &policy, "v1"),
            compute_run_id(&a, &run, &policy, "v1")
        );
    }
}
