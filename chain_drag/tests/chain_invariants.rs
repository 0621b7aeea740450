use chain_drag::{ChainModel, HandleSet, Point3};

fn prefix_sum(chain: &ChainModel, i: usize) -> Point3 {
    let mut sum = chain.anchor();
    for k in 0..=i {
        sum += chain.local_offset(k).unwrap();
    }
    sum
}

#[test]
fn prefix_sum_holds_after_every_mutation() {
    let mut chain = ChainModel::new(6, 1.5, Point3::new(2.0, -1.0, 4.0)).unwrap();
    let mut step = 0.0_f64;
    for round in 0..50 {
        let index = (round * 7) % chain.len();
        step += 0.37;
        let offset = Point3::new(step.sin() * 3.0, step.cos(), (round as f64) * -0.25);
        chain.set_local_offset(index, offset).unwrap();
        for i in 0..chain.len() {
            assert_eq!(chain.absolute_position(i).unwrap(), prefix_sum(&chain, i));
        }
        let all = chain.absolute_positions();
        for (i, p) in all.iter().enumerate() {
            assert_eq!(*p, prefix_sum(&chain, i));
        }
    }
}

#[test]
fn refresh_is_idempotent() {
    let mut chain = ChainModel::new(4, 5.0, Point3::ZERO).unwrap();
    let mut handles = HandleSet::build(&chain, Point3::new(7.0, 2.0, 7.0));
    chain.set_local_offset(3, Point3::new(-2.0, 4.0, 1.0)).unwrap();
    handles.refresh(&chain);
    let first: Vec<Point3> = handles.iter().map(|h| h.world_position()).collect();
    handles.refresh(&chain);
    let second: Vec<Point3> = handles.iter().map(|h| h.world_position()).collect();
    assert_eq!(first, second);
    for (i, p) in second.iter().enumerate() {
        assert_eq!(*p, chain.absolute_position(i).unwrap());
    }
}

#[test]
fn indices_are_checked_not_clamped() {
    let chain = ChainModel::new(4, 5.0, Point3::ZERO).unwrap();
    let handles = HandleSet::build(&chain, Point3::new(7.0, 2.0, 7.0));
    assert!(chain.absolute_position(chain.len()).is_err());
    assert!(handles.get(handles.len()).is_err());
    assert!(handles.bounds(10).is_err());
}
