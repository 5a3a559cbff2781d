use crate::error::{Error, Result};
use crate::point::Point;
use crate::point_set::PointSet;
use rand::Rng;
use smallvec::SmallVec;

/// Neighbor list: an interior site has exactly six neighbors, so these
/// never spill to the heap.
pub type Neighbors = SmallVec<[Point; 6]>;

/// The boolean lattice state of the simulation.
///
/// Sites live on a 2D centered rectangular (rhombic) lattice. Active sites
/// (`true`) pair into dimers along the x direction and connect into
/// clusters through the dimer-direction and diagonal bonds. The grid is
/// never resized after construction; single sites are flipped in place by
/// the Monte Carlo driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    lx: usize,
    ly: usize,
    // Flat row-major storage, site (x, y) at y*lx + x.
    sites: Vec<bool>,
}

impl Grid {
    /// Build a grid from columns of site values, indexed `data[x][y]`.
    /// Fails unless the data is rectangular with at least one site.
    pub fn from_columns(data: &[Vec<bool>]) -> Result<Self> {
        if data.is_empty() || data[0].is_empty() {
            return Err(Error::GridShape);
        }
        let (lx, ly) = (data.len(), data[0].len());
        if data.iter().any(|column| column.len() != ly) {
            return Err(Error::GridShape);
        }
        let mut sites = vec![false; lx * ly];
        for (x, column) in data.iter().enumerate() {
            for (y, &value) in column.iter().enumerate() {
                sites[y * lx + x] = value;
            }
        }
        Ok(Grid { lx, ly, sites })
    }

    /// An all-inactive grid with the given dimensions.
    pub fn with_dims(lx: usize, ly: usize) -> Result<Self> {
        if lx == 0 || ly == 0 {
            return Err(Error::GridDims(lx, ly));
        }
        Ok(Grid {
            lx,
            ly,
            sites: vec![false; lx * ly],
        })
    }

    /// A grid with each site activated by a fair coin flip.
    pub fn random<R: Rng>(lx: usize, ly: usize, rng: &mut R) -> Result<Self> {
        let mut grid = Self::with_dims(lx, ly)?;
        for site in grid.sites.iter_mut() {
            *site = rng.gen();
        }
        Ok(grid)
    }

    /// A random grid with exactly `n` active sites (`n` is clamped to the
    /// total site count).
    pub fn random_constrained<R: Rng>(lx: usize, ly: usize, n: usize, rng: &mut R) -> Result<Self> {
        let mut grid = Self::with_dims(lx, ly)?;
        let n = n.min(lx * ly);
        let mut active = 0;
        while active < n {
            let p = random_point(lx, ly, rng);
            if !grid.get(p) {
                grid.set(p, true);
                active += 1;
            }
        }
        Ok(grid)
    }

    /// Width along the dimer direction.
    pub fn lx(&self) -> usize {
        self.lx
    }

    /// Height perpendicular to the dimer direction.
    pub fn ly(&self) -> usize {
        self.ly
    }

    /// Total number of sites.
    pub fn site_count(&self) -> usize {
        self.lx * self.ly
    }

    /// True if `p` lies on the grid.
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x < self.lx && p.y < self.ly
    }

    fn check_bounds(&self, p: Point) {
        assert!(
            self.in_bounds(p),
            "grid point ({}, {}) out of bounds on {}x{} grid",
            p.x,
            p.y,
            self.lx,
            self.ly
        );
    }

    fn index(&self, p: Point) -> usize {
        self.check_bounds(p);
        p.y * self.lx + p.x
    }

    /// Site value at `p`. Panics if `p` is out of bounds.
    pub fn get(&self, p: Point) -> bool {
        self.sites[self.index(p)]
    }

    /// Set the site at `p`. Panics if `p` is out of bounds.
    pub fn set(&mut self, p: Point, value: bool) {
        let i = self.index(p);
        self.sites[i] = value;
    }

    /// Flip the site at `p`. Panics if `p` is out of bounds.
    pub fn toggle(&mut self, p: Point) {
        let i = self.index(p);
        self.sites[i] = !self.sites[i];
    }

    /// Iterate over all sites with their values.
    pub fn iter(&self) -> impl Iterator<Item = (Point, bool)> + '_ {
        let lx = self.lx;
        self.sites
            .iter()
            .enumerate()
            .map(move |(i, &value)| (Point::new(i % lx, i / lx), value))
    }

    /// Number of active sites.
    pub fn active_site_count(&self) -> usize {
        self.sites.iter().filter(|&&value| value).count()
    }

    /// Number of complete dimers: pairs `(x, y)`-`(x+1, y)` with even `x`
    /// and both sites active. Stepping by two visits each pair once; an
    /// odd-width grid leaves the final column unpaired.
    pub fn dimer_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.ly {
            let mut x = 0;
            while x + 1 < self.lx {
                if self.get(Point::new(x, y)) && self.get(Point::new(x + 1, y)) {
                    count += 1;
                }
                x += 2;
            }
        }
        count
    }

    /// The site `p` pairs with: the right neighbor for even `x`, the left
    /// neighbor for odd `x`. `None` for the unpaired final column of an
    /// odd-width grid. Panics if `p` is out of bounds.
    pub fn dimer_partner(&self, p: Point) -> Option<Point> {
        self.check_bounds(p);
        if p.x % 2 == 0 {
            if p.x + 1 == self.lx {
                None
            } else {
                Some(Point::new(p.x + 1, p.y))
            }
        } else {
            Some(Point::new(p.x - 1, p.y))
        }
    }

    /// Signed change in the dimer count if the site at `p` were flipped:
    /// +1 when activating `p` would complete a dimer, -1 when deactivating
    /// it would break one, 0 otherwise (including the no-partner case).
    pub fn dimer_change(&self, p: Point) -> i32 {
        let partner = match self.dimer_partner(p) {
            Some(partner) => partner,
            None => return 0,
        };
        match (self.get(p), self.get(partner)) {
            (true, true) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    /// Neighbors of `p` along the dimer (x) direction.
    pub fn dimer_neighbors(&self, p: Point) -> Neighbors {
        self.check_bounds(p);
        let mut ns = Neighbors::new();
        if p.x > 0 {
            ns.push(Point::new(p.x - 1, p.y));
        }
        if p.x + 1 < self.lx {
            ns.push(Point::new(p.x + 1, p.y));
        }
        ns
    }

    /// Diagonal neighbors of `p`. The offsets depend on the parity of the
    /// row, which is what makes the lattice rhombic rather than square.
    pub fn diag_neighbors(&self, p: Point) -> Neighbors {
        self.check_bounds(p);
        let (x, y) = (p.x, p.y);
        let mut ns = Neighbors::new();
        if y % 2 == 0 {
            if y > 0 {
                ns.push(Point::new(x, y - 1));
            }
            if y + 1 < self.ly {
                ns.push(Point::new(x, y + 1));
            }
            if x > 0 && y > 0 {
                ns.push(Point::new(x - 1, y - 1));
            }
            if x > 0 && y + 1 < self.ly {
                ns.push(Point::new(x - 1, y + 1));
            }
        } else {
            // odd y implies y > 0
            ns.push(Point::new(x, y - 1));
            if y + 1 < self.ly {
                ns.push(Point::new(x, y + 1));
            }
            if x + 1 < self.lx {
                ns.push(Point::new(x + 1, y - 1));
            }
            if x + 1 < self.lx && y + 1 < self.ly {
                ns.push(Point::new(x + 1, y + 1));
            }
        }
        ns
    }

    /// All neighbors of `p`: dimer direction plus diagonals.
    pub fn neighbors(&self, p: Point) -> Neighbors {
        let mut ns = self.dimer_neighbors(p);
        ns.extend(self.diag_neighbors(p));
        ns
    }

    /// The set of currently active sites.
    pub fn active_sites(&self) -> PointSet {
        let mut ps = PointSet::new(self.lx, self.ly);
        for (p, value) in self.iter() {
            if value {
                ps.add(p);
            }
        }
        ps
    }

    /// The connected cluster of active sites containing `p`, or an empty
    /// set when `p` is inactive. Iterative DFS, so system-spanning clusters
    /// cannot exhaust the call stack.
    pub fn cluster(&self, p: Point) -> PointSet {
        let mut members = PointSet::new(self.lx, self.ly);
        if !self.get(p) {
            return members;
        }
        members.add(p);
        let mut stack = vec![p];
        while let Some(site) = stack.pop() {
            for n in self.neighbors(site) {
                if self.get(n) && members.add(n) {
                    stack.push(n);
                }
            }
        }
        members
    }

    /// Partition the active sites into connected clusters.
    ///
    /// A single union-find pass over the active bonds followed by one
    /// grouping pass, near-linear in the number of active sites.
    pub fn all_clusters(&self) -> Vec<PointSet> {
        let n = self.site_count();
        let mut parent: Vec<u32> = (0..n as u32).collect();
        let mut rank = vec![0u8; n];
        for (p, value) in self.iter() {
            if !value {
                continue;
            }
            let i = p.to_index(self.lx, self.ly) as u32;
            for nb in self.neighbors(p) {
                if self.get(nb) {
                    union(&mut parent, &mut rank, i, nb.to_index(self.lx, self.ly) as u32);
                }
            }
        }
        let mut cluster_slot: Vec<Option<usize>> = vec![None; n];
        let mut clusters: Vec<PointSet> = Vec::new();
        for (p, value) in self.iter() {
            if !value {
                continue;
            }
            let root = find(&mut parent, p.to_index(self.lx, self.ly) as u32) as usize;
            let slot = match cluster_slot[root] {
                Some(slot) => slot,
                None => {
                    cluster_slot[root] = Some(clusters.len());
                    clusters.push(PointSet::new(self.lx, self.ly));
                    clusters.len() - 1
                }
            };
            clusters[slot].add(p);
        }
        clusters
    }

    /// The largest cluster, or `None` on an all-inactive grid. Ties go to
    /// the first cluster encountered.
    pub fn largest_cluster(&self) -> Option<PointSet> {
        let mut best: Option<PointSet> = None;
        for cluster in self.all_clusters() {
            match &best {
                Some(b) if cluster.len() <= b.len() => {}
                _ => best = Some(cluster),
            }
        }
        best
    }
}

/// A uniformly random site on an `lx` by `ly` lattice.
pub fn random_point<R: Rng>(lx: usize, ly: usize, rng: &mut R) -> Point {
    Point::new(rng.gen_range(0..lx), rng.gen_range(0..ly))
}

// Union-find with path halving and union by rank.

fn find(parent: &mut [u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        parent[x as usize] = parent[parent[x as usize] as usize];
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], rank: &mut [u8], x: u32, y: u32) {
    let rx = find(parent, x);
    let ry = find(parent, y);
    if rx == ry {
        return;
    }
    if rank[rx as usize] < rank[ry as usize] {
        parent[rx as usize] = ry;
    } else {
        parent[ry as usize] = rx;
        if rank[rx as usize] == rank[ry as usize] {
            rank[rx as usize] += 1;
        }
    }
}
