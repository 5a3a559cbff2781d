use crate::point::Point;
use rand::Rng;

/// A set of lattice points over a fixed `lx` by `ly` universe.
///
/// Backed by a dense slot map from linearized site indices to positions in a
/// key vector, giving O(1) add, remove, and membership alongside cheap
/// retrieval of an arbitrary or uniformly random element. Cluster searches
/// lean on all of these.
#[derive(Clone, Debug)]
pub struct PointSet {
    lx: usize,
    ly: usize,
    slots: Vec<Option<usize>>,
    keys: Vec<Point>,
}

impl PointSet {
    /// An empty set over an `lx` by `ly` lattice.
    pub fn new(lx: usize, ly: usize) -> Self {
        PointSet {
            lx,
            ly,
            slots: vec![None; lx * ly],
            keys: Vec::new(),
        }
    }

    /// Lattice width of the universe.
    pub fn lx(&self) -> usize {
        self.lx
    }

    /// Lattice height of the universe.
    pub fn ly(&self) -> usize {
        self.ly
    }

    /// Insert a point. Returns false if it was already present.
    /// Panics if the point lies outside the universe.
    pub fn add(&mut self, p: Point) -> bool {
        let slot = p.to_index(self.lx, self.ly);
        match self.slots[slot] {
            Some(_) => false,
            None => {
                self.slots[slot] = Some(self.keys.len());
                self.keys.push(p);
                true
            }
        }
    }

    /// Remove a point. Returns false if it was not present.
    /// Panics if the point lies outside the universe.
    pub fn remove(&mut self, p: Point) -> bool {
        let slot = p.to_index(self.lx, self.ly);
        match self.slots[slot] {
            None => false,
            Some(keys_index) => {
                // Swap the victim to the back of the key vector, repoint the
                // displaced key's slot, then pop.
                let last = self.keys.len() - 1;
                self.keys.swap(keys_index, last);
                if keys_index != last {
                    let moved = self.keys[keys_index];
                    self.slots[moved.to_index(self.lx, self.ly)] = Some(keys_index);
                }
                self.keys.pop();
                self.slots[slot] = None;
                true
            }
        }
    }

    /// Membership test. Panics if the point lies outside the universe.
    pub fn contains(&self, p: Point) -> bool {
        self.slots[p.to_index(self.lx, self.ly)].is_some()
    }

    /// Any element of the set, or `None` when empty.
    pub fn arbitrary(&self) -> Option<Point> {
        self.keys.last().copied()
    }

    /// A uniformly random element of the set, or `None` when empty.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<Point> {
        if self.keys.is_empty() {
            None
        } else {
            Some(self.keys[rng.gen_range(0..self.keys.len())])
        }
    }

    /// Number of points in the set.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over the members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.keys.iter()
    }
}

/// Order-independent set equality over the same universe.
impl PartialEq for PointSet {
    fn eq(&self, other: &Self) -> bool {
        self.lx == other.lx
            && self.ly == other.ly
            && self.keys.len() == other.keys.len()
            && self.keys.iter().all(|&p| other.contains(p))
    }
}

impl Eq for PointSet {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn add_remove_contains() {
        let l = 5;
        let mut ps = PointSet::new(l, l);
        for i in 0..l {
            let p = Point::new(i, i);
            assert!(ps.add(p));
            assert!(ps.contains(p));
        }
        assert_eq!(ps.len(), l);
        for i in 0..l {
            let p = Point::new(i, i);
            assert!(ps.remove(p));
            assert!(!ps.contains(p));
        }
        assert!(ps.is_empty());
    }

    #[test]
    fn double_add_and_remove_are_noops() {
        let mut ps = PointSet::new(3, 3);
        let p = Point::new(1, 2);
        assert!(ps.add(p));
        assert!(!ps.add(p));
        assert_eq!(ps.len(), 1);
        assert!(ps.remove(p));
        assert!(!ps.remove(p));
        assert_eq!(ps.len(), 0);
    }

    #[test]
    fn iteration_covers_members() {
        let mut ps = PointSet::new(4, 4);
        for x in 0..4 {
            ps.add(Point::new(x, x));
        }
        let copy = ps.clone();
        for &p in copy.iter() {
            assert!(ps.remove(p));
        }
        assert!(ps.is_empty());
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let mut a = PointSet::new(3, 3);
        let mut b = PointSet::new(3, 3);
        a.add(Point::new(0, 0));
        a.add(Point::new(2, 1));
        b.add(Point::new(2, 1));
        b.add(Point::new(0, 0));
        assert_eq!(a, b);
        b.add(Point::new(1, 1));
        assert_ne!(a, b);
    }

    #[test]
    fn equality_requires_same_universe() {
        let a = PointSet::new(3, 3);
        let b = PointSet::new(3, 4);
        assert_ne!(a, b);
    }

    #[test]
    fn arbitrary_and_random_return_members() {
        let mut ps = PointSet::new(4, 4);
        assert_eq!(ps.arbitrary(), None);
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(ps.random(&mut rng), None);
        for x in 0..4 {
            ps.add(Point::new(x, 0));
        }
        for _ in 0..32 {
            let p = ps.random(&mut rng).unwrap();
            assert!(ps.contains(p));
        }
        assert!(ps.contains(ps.arbitrary().unwrap()));
    }

    #[test]
    #[should_panic]
    fn out_of_universe_access_panics() {
        let ps = PointSet::new(2, 2);
        ps.contains(Point::new(2, 0));
    }
}
