//! Script-side behaviour against the recording call table.

use std::rc::Rc;

use tether_core::ecs::{Component, EntityId};
use tether_core::math::{Vec2, Vec3, Vec4};
use tether_script::testing::RecordingCalls;
use tether_script::{
    glue, CallName, CircleRendererComponent, Entity, Rigidbody2DComponent, ScriptComponent,
    TextComponent, TransformComponent,
};

fn install() -> (Rc<RecordingCalls>, glue::GlueGuard) {
    let calls = Rc::new(RecordingCalls::new());
    let guard = glue::install(calls.clone());
    (calls, guard)
}

fn presence_matches<T: ScriptComponent>(entity: Entity) {
    let present = entity.has_component::<T>();
    assert_eq!(entity.get_component::<T>().is_some(), present, "{}", T::NAME);
}

#[test]
fn get_component_agrees_with_has_component() {
    let (calls, _glue) = install();
    calls.spawn(
        EntityId::from_raw(1),
        "Everything",
        &[
            TransformComponent::component_type(),
            CircleRendererComponent::component_type(),
            Rigidbody2DComponent::component_type(),
            TextComponent::component_type(),
        ],
    );
    calls.spawn(EntityId::from_raw(2), "Bare", &[]);
    calls.spawn(EntityId::from_raw(3), "Label", &[TextComponent::component_type()]);

    for raw in [1, 2, 3] {
        let entity = Entity::from_id(EntityId::from_raw(raw));
        presence_matches::<TransformComponent>(entity);
        presence_matches::<CircleRendererComponent>(entity);
        presence_matches::<Rigidbody2DComponent>(entity);
        presence_matches::<TextComponent>(entity);
    }
}

#[test]
fn transform_translation_round_trips_on_entity_42() {
    let (calls, _glue) = install();
    calls.spawn(EntityId::from_raw(42), "Player", &[TransformComponent::component_type()]);

    let entity = Entity::from_id(EntityId::from_raw(42));
    let transform = entity.get_component::<TransformComponent>().unwrap();
    transform.set_translation(Vec3::new(1.0, 2.0, 3.0));

    assert_eq!(transform.translation(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(entity.translation(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn vector_writes_read_back_exactly() {
    let (calls, _glue) = install();
    calls.spawn(
        EntityId::from_raw(5),
        "Shape",
        &[
            TransformComponent::component_type(),
            CircleRendererComponent::component_type(),
            TextComponent::component_type(),
        ],
    );
    let entity = Entity::from_id(EntityId::from_raw(5));

    let transform = entity.get_component::<TransformComponent>().unwrap();
    let rotation = Vec3::new(0.1, -0.25, std::f32::consts::FRAC_PI_3);
    transform.set_rotation(rotation);
    transform.set_scale(Vec3::splat(0.3));
    assert_eq!(transform.rotation(), rotation);
    assert_eq!(transform.scale(), Vec3::splat(0.3));

    let circle = entity.get_component::<CircleRendererComponent>().unwrap();
    let color = Vec4::new(0.9, 0.8, 0.7, 0.6);
    circle.set_color(color);
    assert_eq!(circle.color(), color);

    let text = entity.get_component::<TextComponent>().unwrap();
    text.set_color(color);
    assert_eq!(text.color(), color);
}

#[test]
fn entity_7_without_rigidbody() {
    let (calls, _glue) = install();
    calls.spawn(EntityId::from_raw(7), "Prop", &[TransformComponent::component_type()]);

    let entity = Entity::from_id(EntityId::from_raw(7));
    assert!(!entity.has_component::<Rigidbody2DComponent>());
    assert!(entity.get_component::<Rigidbody2DComponent>().is_none());
}

#[test]
fn missing_name_yields_sentinel() {
    let (calls, _glue) = install();
    calls.spawn(EntityId::from_raw(1), "Player", &[]);

    let found = Entity::find_entity_by_name("Player");
    assert_eq!(found.id(), EntityId::from_raw(1));

    let missing = Entity::find_entity_by_name("Nobody");
    assert_eq!(missing.id(), EntityId::NULL);
    assert!(!missing.is_valid());
    assert!(!missing.has_component::<TransformComponent>());
}

#[test]
fn impulse_overloads_stay_distinct() {
    let (calls, _glue) = install();
    calls.spawn(EntityId::from_raw(9), "Ball", &[Rigidbody2DComponent::component_type()]);
    let body = Entity::from_id(EntityId::from_raw(9))
        .get_component::<Rigidbody2DComponent>()
        .unwrap();
    calls.clear_calls();

    let impulse = Vec2::new(0.0, 10.0);
    body.apply_linear_impulse(impulse, Vec2::ZERO, true);
    body.apply_linear_impulse_to_center(impulse, true);

    assert_eq!(
        calls.calls(),
        vec![
            CallName::Rigidbody2DApplyLinearImpulse,
            CallName::Rigidbody2DApplyLinearImpulseToCenter,
        ]
    );
    let recorded = calls.impulses();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0].impulse, recorded[1].impulse);
    assert_eq!(recorded[0].point, Some(Vec2::ZERO));
    assert_eq!(recorded[1].point, None);
}

struct Player {
    health: u32,
}

struct Enemy;

#[test]
fn as_script_checks_instance_type() {
    let (calls, _glue) = install();
    calls.spawn(EntityId::from_raw(3), "Player", &[]);
    calls.attach_script(EntityId::from_raw(3), Rc::new(Player { health: 100 }));

    let entity = Entity::from_id(EntityId::from_raw(3));
    assert_eq!(entity.as_script::<Player>().map(|p| p.health), Some(100));
    assert!(entity.as_script::<Enemy>().is_none());

    let scriptless = Entity::from_id(EntityId::from_raw(4));
    assert!(scriptless.as_script::<Player>().is_none());
}

#[test]
fn engine_side_changes_are_visible_immediately() {
    let (calls, _glue) = install();
    let id = EntityId::from_raw(11);
    calls.spawn(id, "Ring", &[CircleRendererComponent::component_type()]);
    let circle = Entity::from_id(id)
        .get_component::<CircleRendererComponent>()
        .unwrap();

    circle.set_thickness(0.25);
    calls.set_circle_thickness(id, 0.75);
    assert_eq!(circle.thickness(), 0.75);
}
