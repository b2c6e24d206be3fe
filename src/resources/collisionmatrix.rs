//! Symmetric layer-vs-layer collision table.
//!
//! The default table is:
//!
//! | Layer | Collides with |
//! |---|---|
//! | Default | Default, Player, Enemy, Environment |
//! | Player | Enemy, Environment, EnemyProjectile, Pickup, Trigger |
//! | Enemy | Environment, PlayerProjectile |
//! | PlayerProjectile | Enemy, Environment |
//! | EnemyProjectile | Player, Environment |
//! | Environment | Projectile |
//! | Pickup | Player |
//! | Trigger | Player, Enemy |
//!
//! Every other pair, including unlisted self-pairs such as Enemy vs Enemy,
//! starts disabled. [`CollisionMatrix::set_collision`] always writes both
//! `(a, b)` and `(b, a)`, so the table stays symmetric.

use crate::components::collisionlayer::CollisionLayer;

const N: usize = CollisionLayer::COUNT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMatrix {
    table: [[bool; N]; N],
}

impl Default for CollisionMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionMatrix {
    /// Matrix with the engine's default rules.
    pub fn new() -> Self {
        use CollisionLayer::*;

        let mut matrix = Self::empty();
        let rules: [(CollisionLayer, &[CollisionLayer]); 8] = [
            (Default, &[Default, Player, Enemy, Environment]),
            (Player, &[Enemy, Environment, EnemyProjectile, Pickup, Trigger]),
            (Enemy, &[Environment, PlayerProjectile]),
            (PlayerProjectile, &[Enemy, Environment]),
            (EnemyProjectile, &[Player, Environment]),
            (Environment, &[Projectile]),
            (Pickup, &[Player]),
            (Trigger, &[Player, Enemy]),
        ];
        for (layer, others) in rules {
            for other in others {
                matrix.set_collision(layer, *other, true);
            }
        }
        matrix
    }

    /// Matrix where nothing collides.
    pub fn empty() -> Self {
        Self {
            table: [[false; N]; N],
        }
    }

    pub fn can_collide(&self, a: CollisionLayer, b: CollisionLayer) -> bool {
        self.table[a.index()][b.index()]
    }

    pub fn set_collision(&mut self, a: CollisionLayer, b: CollisionLayer, allowed: bool) {
        self.table[a.index()][b.index()] = allowed;
        self.table[b.index()][a.index()] = allowed;
    }

    /// Every enabled pair once, with `a <= b`.
    pub fn allowed_pairs(&self) -> impl Iterator<Item = (CollisionLayer, CollisionLayer)> + '_ {
        CollisionLayer::ALL.into_iter().flat_map(move |a| {
            CollisionLayer::ALL
                .into_iter()
                .filter(move |b| a <= *b && self.can_collide(a, *b))
                .map(move |b| (a, b))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CollisionLayer::*;

    fn assert_symmetric(matrix: &CollisionMatrix) {
        for a in CollisionLayer::ALL {
            for b in CollisionLayer::ALL {
                assert_eq!(
                    matrix.can_collide(a, b),
                    matrix.can_collide(b, a),
                    "asymmetric pair {a} / {b}"
                );
            }
        }
    }

    #[test]
    fn default_rules() {
        let m = CollisionMatrix::new();
        assert!(m.can_collide(Default, Default));
        assert!(m.can_collide(Default, Environment));
        assert!(m.can_collide(Player, Enemy));
        assert!(m.can_collide(Player, Pickup));
        assert!(m.can_collide(Player, EnemyProjectile));
        assert!(m.can_collide(Player, Trigger));
        assert!(m.can_collide(Enemy, PlayerProjectile));
        assert!(m.can_collide(Trigger, Enemy));
        assert!(m.can_collide(Projectile, Environment));
        assert!(m.can_collide(PlayerProjectile, Environment));

        assert!(!m.can_collide(Enemy, Enemy));
        assert!(!m.can_collide(Player, Player));
        assert!(!m.can_collide(Pickup, Enemy));
        assert!(!m.can_collide(Player, PlayerProjectile));
        assert!(!m.can_collide(Enemy, EnemyProjectile));
        assert!(!m.can_collide(Projectile, Player));
        assert!(!m.can_collide(Trigger, Trigger));
        assert!(!m.can_collide(Default, Pickup));
    }

    #[test]
    fn default_matrix_has_expected_pair_count() {
        assert_eq!(CollisionMatrix::new().allowed_pairs().count(), 15);
    }

    #[test]
    fn default_is_symmetric() {
        assert_symmetric(&CollisionMatrix::new());
    }

    #[test]
    fn set_collision_keeps_symmetry() {
        let mut m = CollisionMatrix::new();
        m.set_collision(Enemy, Enemy, true);
        m.set_collision(Pickup, Enemy, true);
        m.set_collision(Player, Enemy, false);
        m.set_collision(Trigger, Projectile, true);
        m.set_collision(Projectile, Trigger, false);

        assert!(m.can_collide(Enemy, Enemy));
        assert!(m.can_collide(Enemy, Pickup));
        assert!(!m.can_collide(Enemy, Player));
        assert!(!m.can_collide(Trigger, Projectile));
        assert_symmetric(&m);
    }

    #[test]
    fn empty_allows_nothing() {
        assert_eq!(CollisionMatrix::empty().allowed_pairs().count(), 0);
    }
}
