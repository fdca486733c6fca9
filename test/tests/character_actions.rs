use std::sync::Arc;

use tokio::runtime::Handle;

use arshare_character::{
    Action, ActionError, ActionId, ActionStateMachine, Editing, Idle, Locomotion, MovementConfig,
    Seek, Sharing,
};
use arshare_session::{FrameSyncConfig, MessageService, SharedFrameSync};
use arshare_shared::{
    forward, position, ArTracking, Mat4, ObjectHandle, ObjectType, Quat, Role, SceneGraph, Vec3,
};
use arshare_test::{
    assert_mat4_near, init_logger, FakeAnimation, FakeScene, FakeTracking, FakeTransport,
};

const FRAME: f32 = 1.0 / 60.0;

fn scene_with(character: Mat4, target: Mat4) -> (Arc<FakeScene>, ObjectHandle, ObjectHandle) {
    init_logger();
    let scene = Arc::new(FakeScene::new());
    let character = scene.add_object(character, None);
    let target = scene.add_object(target, None);
    (scene, character, target)
}

fn distance(scene: &FakeScene, character: ObjectHandle, target: ObjectHandle) -> f32 {
    let offset = position(&scene.transform(target)) - position(&scene.transform(character));
    Vec3::new(offset.x, 0.0, offset.z).length()
}

#[test]
fn seek_player_walks_straight_and_ends_once() {
    let (scene, character, player) =
        scene_with(Mat4::IDENTITY, Mat4::from_translation(Vec3::new(0.0, 0.0, 200.0)));
    let config = MovementConfig::default();
    let (mut machine, mut ended) = ActionStateMachine::new();
    let (animation, frames) = FakeAnimation::new(1.0);
    machine.add_action(Box::new(Seek::player(
        Locomotion::new(scene.clone(), character, player),
        &config,
        Some(animation),
        machine.listener(),
    )));
    machine
        .start_action(ActionId::SeekPlayer)
        .expect("seek player was added");

    let mut last = distance(&scene, character, player);
    let mut arrived_after = None;
    for frame in 0..500 {
        machine.run(FRAME);
        let now = distance(&scene, character, player);
        assert!(now <= last + 1.0e-4, "distance grew at frame {}", frame);
        last = now;
        if arrived_after.is_none() && ended.try_recv().is_ok() {
            arrived_after = Some(frame);
        }
    }

    // 150 units at 1.5 per frame, then one frame to notice; rounding in
    // the heading blend may cost one extra step
    let arrived_after = arrived_after.expect("seek should end");
    assert!((100..=101).contains(&arrived_after), "ended at frame {}", arrived_after);
    assert!(ended.try_recv().is_err(), "ActionEnd reported twice");
    assert!(last <= config.player_stop_distance());
    assert!(last > config.player_stop_distance() - config.walking_speed);

    let reached = position(&scene.transform(character));
    assert!(reached.x.abs() < 1.0e-3);
    assert!(reached.z >= 150.0 - 1.0e-2);
    assert_eq!(frames.lock().len(), arrived_after + 1);
}

#[test]
fn seek_ball_runs_and_stops_closer() {
    let (scene, character, ball) =
        scene_with(Mat4::IDENTITY, Mat4::from_translation(Vec3::new(0.0, 0.0, 100.0)));
    let config = MovementConfig::default();
    let (mut machine, mut ended) = ActionStateMachine::new();
    machine.add_action(Box::new(Seek::ball(
        Locomotion::new(scene.clone(), character, ball),
        &config,
        None,
        machine.listener(),
    )));
    machine.start_action(ActionId::SeekBall).expect("seek ball was added");

    for _ in 0..200 {
        machine.run(FRAME);
    }

    assert_eq!(ended.try_recv(), Ok(ActionId::SeekBall));
    let remaining = distance(&scene, character, ball);
    assert!(remaining <= config.ball_stop_distance());
    assert!(remaining > config.ball_stop_distance() - config.running_speed);
}

#[test]
fn target_behind_turns_in_place_before_walking() {
    let (scene, character, player) =
        scene_with(Mat4::IDENTITY, Mat4::from_translation(Vec3::new(100.0, 0.0, -100.0)));
    let config = MovementConfig::default();
    let (mut machine, _ended) = ActionStateMachine::new();
    machine.add_action(Box::new(Seek::player(
        Locomotion::new(scene.clone(), character, player),
        &config,
        None,
        machine.listener(),
    )));
    machine
        .start_action(ActionId::SeekPlayer)
        .expect("seek player was added");

    let heading = |scene: &FakeScene| forward(&scene.transform(character));
    let start = heading(scene.as_ref());

    machine.run(FRAME);
    // Target is 135 degrees off: the character turns but does not move
    assert!(position(&scene.transform(character)).length() < 1.0e-4);
    assert!(heading(scene.as_ref()).angle_between(start) > 1.0e-3);

    for _ in 0..200 {
        machine.run(FRAME);
    }
    assert!(position(&scene.transform(character)).length() > 1.0);
}

#[test]
fn reentering_seek_rearms_the_end_report() {
    let (scene, character, player) =
        scene_with(Mat4::IDENTITY, Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0)));
    let config = MovementConfig::default();
    let (mut machine, mut ended) = ActionStateMachine::new();
    machine.add_action(Box::new(Seek::player(
        Locomotion::new(scene.clone(), character, player),
        &config,
        None,
        machine.listener(),
    )));
    machine.add_action(Box::new(Idle::new(
        Locomotion::new(scene, character, player),
        config.clone(),
        None,
    )));

    machine.start_action(ActionId::SeekPlayer).expect("added");
    machine.run(FRAME);
    machine.run(FRAME);
    assert_eq!(ended.try_recv(), Ok(ActionId::SeekPlayer));
    assert!(ended.try_recv().is_err());

    machine.start_action(ActionId::Idle).expect("added");
    machine.start_action(ActionId::SeekPlayer).expect("added");
    machine.run(FRAME);
    assert_eq!(ended.try_recv(), Ok(ActionId::SeekPlayer));
}

#[test]
fn idle_faces_the_player_without_moving() {
    let start = Mat4::from_translation(Vec3::new(5.0, 0.0, 5.0));
    let (scene, character, player) =
        scene_with(start, Mat4::from_translation(Vec3::new(50.0, 0.0, 5.0)));
    let (animation, frames) = FakeAnimation::new(0.5);
    let mut idle = Idle::new(
        Locomotion::new(scene.clone(), character, player),
        MovementConfig::default(),
        Some(animation),
    );

    idle.entry();
    for _ in 0..300 {
        idle.run(FRAME);
    }
    idle.exit();

    let transform = scene.transform(character);
    assert!((position(&transform) - Vec3::new(5.0, 0.0, 5.0)).length() < 1.0e-3);
    assert!(forward(&transform).angle_between(Vec3::X) < 0.05);
    // restart() plus one frame per run
    assert_eq!(frames.lock().len(), 301);
    assert!(frames.lock().iter().all(|time| *time < 0.5));
}

#[test]
fn starting_an_unknown_action_fails() {
    let (mut machine, _ended) = ActionStateMachine::new();

    match machine.start_action(ActionId::Sharing) {
        Err(ActionError::UnknownAction { action }) => assert_eq!(action, ActionId::Sharing),
        other => panic!("Expected UnknownAction, got {:?}", other),
    }
    assert_eq!(machine.current(), None);
}

#[test]
fn action_ids_are_stable() {
    let ids = [
        ActionId::Idle,
        ActionId::SeekPlayer,
        ActionId::SeekBall,
        ActionId::Editing,
        ActionId::Sharing,
    ];
    let codes: Vec<u8> = ids.iter().map(|id| id.to_u8()).collect();
    assert_eq!(codes, vec![0, 1, 2, 3, 4]);
}

fn frame_sync(scene: Arc<FakeScene>, tracking: Arc<FakeTracking>) -> Arc<SharedFrameSync> {
    Arc::new(SharedFrameSync::new(
        FrameSyncConfig::default(),
        scene,
        tracking,
        MessageService::new(Arc::new(FakeTransport::new())),
        Handle::current(),
    ))
}

#[tokio::test(start_paused = true)]
async fn editing_shares_the_character_while_active() {
    init_logger();
    let scene = Arc::new(FakeScene::new());
    let tracking = Arc::new(FakeTracking::new());
    let frame_sync = frame_sync(scene.clone(), tracking);
    let character = scene.add_object(Mat4::IDENTITY, None);

    let (mut machine, _ended) = ActionStateMachine::new();
    machine.add_action(Box::new(Editing::new(frame_sync.clone(), character)));
    machine.add_action(Box::new(Sharing::new(
        frame_sync.clone(),
        scene.clone(),
        character,
    )));

    machine.start_action(ActionId::Editing).expect("added");
    let records = frame_sync.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].object_type, ObjectType::PET);
    assert_eq!(records[0].object, character);

    machine.start_action(ActionId::Sharing).expect("added");
    assert!(frame_sync.records().is_empty());
}

#[tokio::test(start_paused = true)]
async fn leaving_sharing_snaps_to_the_shared_anchor() {
    init_logger();
    let scene = Arc::new(FakeScene::new());
    let tracking = Arc::new(FakeTracking::new());
    let frame_sync = frame_sync(scene.clone(), tracking.clone());
    let character = scene.add_object(Mat4::IDENTITY, None);
    let anchor_pose =
        Mat4::from_rotation_translation(Quat::from_rotation_y(1.2), Vec3::new(4.0, 0.0, -3.0));
    let anchor = tracking.create_local_anchor(anchor_pose);

    let mut sharing = Sharing::new(frame_sync.clone(), scene.clone(), character);

    // Not sharing: leaving keeps the pose
    sharing.entry();
    sharing.exit();
    assert_mat4_near!(scene.transform(character), Mat4::IDENTITY);

    frame_sync.start_sharing(anchor, Role::Guest);
    sharing.entry();
    sharing.exit();
    assert_mat4_near!(scene.transform(character), anchor_pose);
}
