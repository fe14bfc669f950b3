use crate::entities::{Fleet, Projectile};

/// Removes every projectile and enemy that overlap, in one pass.
///
/// A projectile is not stopped by its first hit: it destroys every enemy it
/// overlaps this frame. Returns the number of enemies destroyed, counting
/// each enemy once even if several projectiles hit it.
pub fn remove_overlapping(projectiles: &mut Vec<Projectile>, fleet: &mut Fleet) -> usize {
    let mut projectiles_to_remove = Vec::new();
    let mut enemies_to_remove = Vec::new();

    for (p_idx, projectile) in projectiles.iter().enumerate() {
        let projectile_bounds = projectile.bounds();
        for (e_idx, enemy) in fleet.enemies.iter().enumerate() {
            if projectile_bounds.overlaps(&enemy.bounds()) {
                projectiles_to_remove.push(p_idx);
                enemies_to_remove.push(e_idx);
            }
        }
    }

    // Remove in reverse order to avoid index issues
    projectiles_to_remove.sort_unstable();
    projectiles_to_remove.dedup();
    for idx in projectiles_to_remove.into_iter().rev() {
        projectiles.remove(idx);
    }

    enemies_to_remove.sort_unstable();
    enemies_to_remove.dedup();
    let destroyed = enemies_to_remove.len();
    for idx in enemies_to_remove.into_iter().rev() {
        fleet.enemies.remove(idx);
    }

    destroyed
}
