//! Spark particle integration and expiry.

use hecs::World;

use starlode_core::components::Spark;
use starlode_core::constants::SPARK_DRAG;
use starlode_core::types::{Position, Velocity};

pub fn run(world: &mut World, dt: f64, despawn_buffer: &mut Vec<hecs::Entity>) {
    despawn_buffer.clear();
    for (entity, (spark, pos, vel)) in world.query_mut::<(&mut Spark, &mut Position, &mut Velocity)>()
    {
        let damp = (1.0 - SPARK_DRAG * dt).max(0.0);
        let v = vel.vec() * damp;
        *vel = Velocity::from_vec(v);
        *pos = Position::from_vec(pos.vec() + v * dt);
        spark.life -= dt;
        if spark.life <= 0.0 {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
