use chain_drag::pick;
use chain_drag::{ChainModel, DragSession, HandleSet, Point3, Ray, SourceId};

fn demo() -> (ChainModel, HandleSet) {
    let _ = env_logger::builder().is_test(true).try_init();
    let chain = ChainModel::new(4, 5.0, Point3::ZERO).unwrap();
    let handles = HandleSet::build(&chain, Point3::new(7.0, 2.0, 7.0));
    (chain, handles)
}

fn ray_toward(p: Point3) -> Ray {
    Ray::new(p + Point3::new(0.0, 0.0, 20.0), Point3::new(0.0, 0.0, -1.0))
}

fn drag(
    session: &mut DragSession,
    joint: usize,
    target: Point3,
    chain: &mut ChainModel,
    handles: &mut HandleSet,
) {
    let at = handles.get(joint).unwrap().world_position();
    let hit = session.begin_drag(&ray_toward(at), handles).unwrap();
    assert_eq!(hit.joint_index, joint);
    session.update_drag(target, chain, handles).unwrap().unwrap();
    session.end_drag(handles);
}

#[test]
fn drag_round_trip() {
    let (mut chain, mut handles) = demo();
    let before = chain.absolute_position(1).unwrap();
    let mut session = DragSession::new(SourceId(0));
    drag(&mut session, 2, Point3::new(10.0, 0.0, 0.0), &mut chain, &mut handles);
    assert_eq!(chain.absolute_position(2).unwrap(), Point3::new(10.0, 0.0, 0.0));
    assert_eq!(chain.absolute_position(1).unwrap(), before);
}

#[test]
fn downstream_translation() {
    let (mut chain, mut handles) = demo();
    let d = Point3::new(4.0, -3.0, 2.0);
    let old: Vec<Point3> = (0..5).map(|i| chain.absolute_position(i).unwrap()).collect();
    let target = old[2] + d;

    let mut session = DragSession::new(SourceId(0));
    drag(&mut session, 2, target, &mut chain, &mut handles);

    for i in 3..5 {
        let moved = chain.absolute_position(i).unwrap() - old[i];
        assert!((moved - d).length() < 1e-12, "joint {} moved by {}", i, moved);
        assert_eq!(handles.get(i).unwrap().world_position(), chain.absolute_position(i).unwrap());
        assert_eq!(chain.local_offset(i).unwrap(), Point3::new(0.0, 5.0, 0.0));
    }
    for (i, p) in old.iter().enumerate().take(2) {
        assert_eq!(chain.absolute_position(i).unwrap(), *p);
    }
}

#[test]
fn repeated_drags_keep_downstream_pose() {
    let (mut chain, mut handles) = demo();
    let mut session = DragSession::new(SourceId(0));
    drag(&mut session, 4, Point3::new(3.0, 10.0, 0.0), &mut chain, &mut handles);
    let tip_offset = chain.local_offset(4).unwrap();
    drag(&mut session, 1, Point3::new(-2.0, -5.0, 0.0), &mut chain, &mut handles);
    assert_eq!(chain.local_offset(4).unwrap(), tip_offset);
    assert_eq!(
        chain.absolute_position(4).unwrap(),
        chain.absolute_position(3).unwrap() + tip_offset
    );
}

#[test]
fn single_holder_across_sessions() {
    let (mut chain, mut handles) = demo();
    let mut sessions: Vec<DragSession> = (0..3).map(|i| DragSession::new(SourceId(i))).collect();
    let ray = ray_toward(handles.get(3).unwrap().world_position());

    let granted: Vec<bool> = sessions
        .iter_mut()
        .map(|s| s.begin_drag(&ray, &mut handles).is_some())
        .collect();
    assert_eq!(granted, vec![true, false, false]);

    for s in &mut sessions {
        s.update_drag(Point3::new(1.0, 5.0, 0.0), &mut chain, &mut handles)
            .unwrap();
    }
    let holders = handles.iter().filter(|h| h.selected_by().is_some()).count();
    assert_eq!(holders, 1);

    sessions[0].end_drag(&mut handles);
    assert!(sessions[1].begin_drag(&ray, &mut handles).is_some());
    assert_eq!(handles.get(3).unwrap().selected_by(), Some(SourceId(1)));
}

#[test]
fn pick_determinism_on_ties() {
    let (mut chain, mut handles) = demo();
    // lay joints 1 and 2 side by side at the same height
    chain.set_local_offset(2, Point3::new(7.0, 0.0, 0.0)).unwrap();
    handles.refresh(&chain);
    let seam = handles.get(1).unwrap().world_position() + Point3::new(3.5, 0.0, 20.0);
    let ray = Ray::new(seam, Point3::new(0.0, 0.0, -1.0));
    for _ in 0..10 {
        assert_eq!(pick::resolve(&ray, &handles).unwrap().joint_index, 1);
    }
}

#[test]
fn release_without_hold_is_safe() {
    let (_, mut handles) = demo();
    let mut session = DragSession::new(SourceId(5));
    assert_eq!(session.end_drag(&mut handles), None);
    assert!(handles.iter().all(|h| h.selected_by().is_none()));
}
