//! Demo scene and script
//!
//! A player with a body and a label, plus a circle named "Marker". The
//! player script drives everything through the script-side API only.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context, Result};
use tether_core::ecs::EntityId;
use tether_core::input::KeyCode;
use tether_core::math::{Vec2, Vec3, Vec4};
use tether_core::physics::BodyType;
use tether_host::physics::NativeBodyKind;
use tether_host::{CircleRenderer, Rigidbody2D, Scene, ScriptHost, Text, Transform};
use tether_script::{
    CircleRendererComponent, Entity, Input, Logger, Rigidbody2DComponent, TextComponent,
    TransformComponent,
};

/// Script object attached to the player.
pub struct PlayerController {
    entity: Entity,
    speed: f32,
    frames: Cell<u32>,
}

impl PlayerController {
    pub fn new(entity: Entity, speed: f32) -> Self {
        Self {
            entity,
            speed,
            frames: Cell::new(0),
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn on_create(&self) {
        Logger::info(&format!("PlayerController created for {}", self.entity.id()));

        if let Some(body) = self.entity.get_component::<Rigidbody2DComponent>() {
            if body.body_type() != BodyType::Dynamic {
                Logger::warn("player body was not dynamic, switching");
                body.set_body_type(BodyType::Dynamic);
            }
        }

        let marker = Entity::find_entity_by_name("Marker");
        if let Some(circle) = marker.get_component::<CircleRendererComponent>() {
            circle.set_color(Vec4::new(1.0, 0.2, 0.2, 1.0));
            circle.set_thickness(0.5);
        }

        if !Entity::find_entity_by_name("Camera").is_valid() {
            Logger::trace("no camera in scene");
        }
    }

    pub fn on_update(&self, _dt: f32) {
        let frame = self.frames.get() + 1;
        self.frames.set(frame);

        let Some(body) = self.entity.get_component::<Rigidbody2DComponent>() else {
            Logger::error("player lost its rigidbody");
            return;
        };

        let mut impulse = Vec2::ZERO;
        if Input::is_key_down(KeyCode::D) {
            impulse.x += self.speed;
        }
        if Input::is_key_down(KeyCode::A) {
            impulse.x -= self.speed;
        }
        if Input::is_key_down(KeyCode::SPACE) {
            impulse.y += self.speed;
        }
        if impulse != Vec2::ZERO {
            body.apply_linear_impulse_to_center(impulse, true);
        }

        if let Some(transform) = self.entity.get_component::<TransformComponent>() {
            let rotation = transform.rotation();
            transform.set_rotation(Vec3::new(rotation.x, rotation.y, 0.0));
        }

        if let Some(label) = self.entity.get_component::<TextComponent>() {
            let velocity = body.linear_velocity();
            label.set_text(&format!("frame {frame}: v = ({:.2}, {:.2})", velocity.x, velocity.y));
        }
    }
}

/// Build the demo scene and register the player script.
pub fn build(host: &ScriptHost) -> Result<EntityId> {
    let player = {
        let mut scene = host.scene_mut();
        let player = scene.create_entity("Player");
        scene.add_component(player, Transform::default())?;
        scene.add_component(player, Rigidbody2D::new(NativeBodyKind::Kinematic))?;
        scene.add_component(player, Text::new("ready"))?;

        let marker = scene.create_entity("Marker");
        scene.add_component(marker, Transform::from_translation(Vec3::new(3.0, 1.0, 0.0)))?;
        scene.add_component(marker, CircleRenderer::default())?;
        player
    };

    let controller = PlayerController::new(Entity::from_id(player), 2.0);
    host.attach_script(player, Rc::new(controller))
        .context("attaching player script")?;
    Ok(player)
}

/// Run a few frames of the demo, feeding scripted key presses.
pub fn run(host: &ScriptHost, player: EntityId, frames: u32) -> Result<()> {
    let controller = Entity::from_id(player)
        .as_script::<PlayerController>()
        .context("player script instance missing")?;
    controller.on_create();

    let dt = 1.0 / 60.0;
    for frame in 0..frames {
        {
            let mut keys = host.keyboard_mut();
            keys.clear();
            keys.press(if frame % 2 == 0 { KeyCode::D } else { KeyCode::SPACE });
        }
        controller.on_update(dt);
        host.step(dt);
    }

    let entity = Entity::from_id(player);
    let text = entity
        .get_component::<TextComponent>()
        .map(|label| label.text())
        .unwrap_or_default();
    tracing::info!(translation = ?entity.translation(), label = %text, "demo finished");
    Logger::cout(&text);
    Ok(())
}
