use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

fn random_voxel(rng: &mut StdRng) -> Voxel {
    Voxel::new(
        rng.random_range(-50..50),
        rng.random_range(-50..50),
        rng.random_range(0..20),
    )
}

#[test]
fn test_euclidean_zero_at_goal() {
    let h = Euclidean::new(Calibration::new(0.3, 0.3, 1.5, "um").unwrap()).unwrap();
    let goal = Voxel::new(4, -2, 9);
    assert_eq!(h.estimate_cost_to_goal(goal, goal), 0.0);
}

#[test]
fn test_euclidean_uses_calibration() {
    let h = Euclidean::new(Calibration::new(1.0, 2.0, 3.0, "um").unwrap()).unwrap();
    let d = h.estimate_cost_to_goal(Voxel::new(0, 0, 0), Voxel::new(0, 0, 2));
    assert!((d - 6.0).abs() < 1e-12);
    let d = h.estimate_cost_to_goal(Voxel::new(1, 1, 0), Voxel::new(4, 3, 0));
    assert!((d - 5.0).abs() < 1e-12);
}

#[test]
fn test_euclidean_triangle_inequality() {
    let h = Euclidean::new(Calibration::new(0.7, 1.1, 2.3, "um").unwrap()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        let a = random_voxel(&mut rng);
        let b = random_voxel(&mut rng);
        let c = random_voxel(&mut rng);
        let direct = h.estimate_cost_to_goal(a, c);
        let via = h.estimate_cost_to_goal(a, b) + h.estimate_cost_to_goal(b, c);
        assert!(direct <= via + 1e-9, "{:?} -> {:?} -> {:?}", a, b, c);
    }
}

#[test]
fn test_dijkstra_always_zero() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let a = random_voxel(&mut rng);
        let b = random_voxel(&mut rng);
        assert_eq!(Dijkstra.estimate_cost_to_goal(a, b), 0.0);
    }
}

#[test]
fn test_model_requires_calibration_for_euclidean() {
    let err = HeuristicModel::new(HeuristicKind::Euclidean, None).unwrap_err();
    assert!(matches!(err, Error::MissingCalibration { .. }));

    let model = HeuristicModel::new(HeuristicKind::Dijkstra, None).unwrap();
    assert_eq!(model.kind(), HeuristicKind::Dijkstra);

    let model =
        HeuristicModel::new(HeuristicKind::Euclidean, Some(Calibration::isotropic())).unwrap();
    assert_eq!(model.kind(), HeuristicKind::Euclidean);
    let d = model.estimate_cost_to_goal(Voxel::new(0, 0, 0), Voxel::new(3, 4, 0));
    assert!((d - 5.0).abs() < 1e-12);
}

#[test]
fn test_model_rejects_invalid_calibration() {
    let bad = Calibration {
        width: 0.0,
        ..Calibration::isotropic()
    };
    assert!(matches!(
        HeuristicModel::new(HeuristicKind::Euclidean, Some(bad)),
        Err(Error::InvalidCalibration { .. })
    ));
}

#[test]
fn test_kind_names() {
    assert_eq!(HeuristicKind::default(), HeuristicKind::Euclidean);
    assert_eq!(HeuristicKind::Dijkstra.to_string(), "dijkstra");
    assert_eq!(
        "euclidean".parse::<HeuristicKind>().unwrap(),
        HeuristicKind::Euclidean
    );
}
