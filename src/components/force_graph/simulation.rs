//! Force simulation driving the node layout.
//!
//! Three forces act on every tick: a link force pulling linked nodes towards
//! each link's preferred distance, many-body repulsion between all node pairs
//! and collision avoidance with a fixed radius. Forces are scaled by `alpha`,
//! which cools towards `alpha_target` every tick; the simulation stops once
//! `alpha` falls below `alpha_min`. Nodes with `fx`/`fy` set are held in place.

/// Physics constants. Defaults follow the usual force-layout conventions.
#[derive(Clone, Debug)]
pub struct SimulationParameters {
	/// Many-body strength; negative values repel.
	pub charge_strength: f64,
	/// Squared distance below which repulsion stops growing.
	pub charge_distance_min2: f64,
	pub collide_radius: f64,
	pub collide_strength: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	pub alpha_min: f64,
	pub alpha_decay: f64,
}

impl Default for SimulationParameters {
	fn default() -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			charge_strength: -30.0,
			charge_distance_min2: 1.0,
			collide_radius: 20.0,
			collide_strength: 1.0,
			velocity_decay: 0.4,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
		}
	}
}

/// Per-node physics state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub fx: Option<f64>,
	pub fy: Option<f64>,
}

impl SimNode {
	/// Free node at (`x`, `y`).
	pub fn at(x: f64, y: f64) -> Self {
		Self {
			x,
			y,
			..Self::default()
		}
	}

	/// Holds the node at (`x`, `y`).
	pub fn pin(&mut self, x: f64, y: f64) {
		self.fx = Some(x);
		self.fy = Some(y);
	}

	/// Releases the node.
	pub fn unpin(&mut self) {
		self.fx = None;
		self.fy = None;
	}
}

#[derive(Clone, Debug)]
struct SimLink {
	source: usize,
	target: usize,
	distance: f64,
	strength: f64,
	/// Share of the correction applied to the target.
	bias: f64,
}

/// Force layout over a fixed set of nodes and links.
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	params: SimulationParameters,
	alpha: f64,
	alpha_target: f64,
	running: bool,
	jiggle_state: u32,
}

impl Simulation {
	/// Creates a running simulation. Links are `(source, target, distance)`
	/// index triples into `nodes`; out of range links are ignored.
	pub fn new(
		nodes: Vec<SimNode>,
		links: &[(usize, usize, f64)],
		params: SimulationParameters,
	) -> Self {
		let mut degree = vec![0usize; nodes.len()];
		let links: Vec<_> = links
			.iter()
			.copied()
			.filter(|&(s, t, _)| s < nodes.len() && t < nodes.len())
			.collect();
		for &(s, t, _) in &links {
			degree[s] += 1;
			degree[t] += 1;
		}
		let links = links
			.into_iter()
			.map(|(source, target, distance)| {
				let (ds, dt) = (degree[source] as f64, degree[target] as f64);
				SimLink {
					source,
					target,
					distance,
					strength: 1.0 / ds.min(dt),
					bias: ds / (ds + dt),
				}
			})
			.collect();

		Self {
			nodes,
			links,
			params,
			alpha: 1.0,
			alpha_target: 0.0,
			running: true,
			jiggle_state: 0x2545_f491,
		}
	}

	/// Node states, in input order.
	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	/// Node state by index.
	pub fn node_mut(&mut self, idx: usize) -> Option<&mut SimNode> {
		self.nodes.get_mut(idx)
	}

	/// Current heat.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Heat `alpha` cools towards.
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Sets the heat to cool towards. Nonzero keeps the layout moving.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Whether ticks still move nodes.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Resumes ticking without resetting alpha.
	pub fn restart(&mut self) {
		self.running = true;
	}

	/// Freezes the layout.
	pub fn stop(&mut self) {
		self.running = false;
	}

	/// Advances one step. Returns whether the simulation is still running.
	pub fn tick(&mut self) -> bool {
		if !self.running {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;

		self.apply_links();
		self.apply_charge();
		self.apply_collision();

		let keep = 1.0 - self.params.velocity_decay;
		for node in &mut self.nodes {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx *= keep;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy *= keep;
					node.y += node.vy;
				}
			}
		}

		if self.alpha < self.params.alpha_min {
			self.running = false;
		}
		self.running
	}

	/// Tiny deterministic offset separating coincident nodes.
	fn jiggle(&mut self) -> f64 {
		self.jiggle_state = self
			.jiggle_state
			.wrapping_mul(1_664_525)
			.wrapping_add(1_013_904_223);
		(self.jiggle_state as f64 / u32::MAX as f64 - 0.5) * 1e-6
	}

	fn apply_links(&mut self) {
		let alpha = self.alpha;
		for i in 0..self.links.len() {
			let SimLink {
				source,
				target,
				distance,
				strength,
				bias,
			} = self.links[i].clone();
			let (s, t) = (&self.nodes[source], &self.nodes[target]);
			let mut x = t.x + t.vx - s.x - s.vx;
			let mut y = t.y + t.vy - s.y - s.vy;
			if x == 0.0 {
				x = self.jiggle();
			}
			if y == 0.0 {
				y = self.jiggle();
			}
			let l = (x * x + y * y).sqrt();
			let l = (l - distance) / l * alpha * strength;
			let (x, y) = (x * l, y * l);

			let t = &mut self.nodes[target];
			t.vx -= x * bias;
			t.vy -= y * bias;
			let s = &mut self.nodes[source];
			s.vx += x * (1.0 - bias);
			s.vy += y * (1.0 - bias);
		}
	}

	fn apply_charge(&mut self) {
		let w = self.params.charge_strength * self.alpha;
		let n = self.nodes.len();
		for i in 0..n {
			let (mut dvx, mut dvy) = (0.0, 0.0);
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut x = self.nodes[j].x - self.nodes[i].x;
				let mut y = self.nodes[j].y - self.nodes[i].y;
				if x == 0.0 {
					x = self.jiggle();
				}
				if y == 0.0 {
					y = self.jiggle();
				}
				let mut l = x * x + y * y;
				if l < self.params.charge_distance_min2 {
					l = (self.params.charge_distance_min2 * l).sqrt();
				}
				dvx += x * w / l;
				dvy += y * w / l;
			}
			self.nodes[i].vx += dvx;
			self.nodes[i].vy += dvy;
		}
	}

	fn apply_collision(&mut self) {
		let r = self.params.collide_radius;
		let min = 2.0 * r;
		let strength = self.params.collide_strength;
		let n = self.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let (a, b) = (&self.nodes[i], &self.nodes[j]);
				let mut x = (a.x + a.vx) - (b.x + b.vx);
				let mut y = (a.y + a.vy) - (b.y + b.vy);
				let l2 = x * x + y * y;
				if l2 >= min * min {
					continue;
				}
				if x == 0.0 {
					x = self.jiggle();
				}
				if y == 0.0 {
					y = self.jiggle();
				}
				let l = (x * x + y * y).sqrt();
				let push = (min - l) / l * strength;
				// Equal radii split the correction evenly.
				let (x, y) = (x * push * 0.5, y * push * 0.5);
				self.nodes[i].vx += x;
				self.nodes[i].vy += y;
				self.nodes[j].vx -= x;
				self.nodes[j].vy -= y;
			}
		}
	}
}
