use crate::error::SceneError;
use crate::geometry::*;
use crate::math::*;

/// Represent vertex indices in triangles; 2^32 vertices should be enough
pub type Index = u32;

#[derive(Copy, Clone, Debug)]
pub struct Triangle {
	pub idxs: [Index; 3],
}

/// Below this determinant a triangle is either edge-on or facing away
const BACKFACE_EPSILON: f64 = 1e-8;

// N.B. There is a 1-1 correspondence between vertices, normals and uvs.
// Those are addressed through the indices stored in triangles.
pub struct Mesh {
	vertices: Vec<Vec3>,
	normals: Vec<Vec3>,
	uvs: Vec<(f64, f64)>,
	triangles: Vec<Triangle>,
	triangles_e1: Vec<Vec3>,
	triangles_e2: Vec<Vec3>,
}

impl Mesh {
	pub fn new(vertices: Vec<Vec3>, normals: Vec<Vec3>, uvs: Vec<(f64, f64)>, triangles: Vec<Triangle>) -> Result<Mesh, SceneError> {
		if normals.len() != vertices.len() || uvs.len() != vertices.len() {
			return Err(SceneError::Invalid {
				object: "mesh",
				reason: format!("{} vertices but {} normals and {} uvs", vertices.len(), normals.len(), uvs.len()),
			});
		}
		if let Some(t) = triangles.iter().find(|t| t.idxs.iter().any(|&i| i as usize >= vertices.len())) {
			return Err(SceneError::Invalid {
				object: "mesh",
				reason: format!("triangle {:?} references a missing vertex", t.idxs),
			});
		}

		let normals = normals.into_iter().map(Vec3::normalized).collect();
		let (triangles_e1, triangles_e2) = Mesh::compute_edges(&vertices[..], &triangles[..]);
		log::debug!("mesh with {} vertices and {} triangles", vertices.len(), triangles.len());

		Ok(Mesh {
			vertices,
			normals,
			uvs,
			triangles,
			triangles_e1,
			triangles_e2,
		})
	}

	/// Tessellate a parametric surface over an `n` x `m` grid of the unit
	/// square. `f` maps (u, v) to a position and a normal.
	pub fn parametric<F>(n: usize, m: usize, f: F) -> Result<Mesh, SceneError>
		where F: Fn(f64, f64) -> (Vec3, Vec3)
	{
		if n == 0 || m == 0 {
			return Err(SceneError::Invalid {
				object: "mesh",
				reason: format!("grid resolution must be positive, got {}x{}", n, m),
			});
		}

		let count = (n + 1) * (m + 1);
		let mut vertices = Vec::with_capacity(count);
		let mut normals = Vec::with_capacity(count);
		let mut uvs = Vec::with_capacity(count);
		for i in 0..n + 1 {
			for j in 0..m + 1 {
				let uv = (i as f64 / n as f64, j as f64 / m as f64);
				let (co, no) = f(uv.0, uv.1);
				vertices.push(co);
				normals.push(no);
				uvs.push(uv);
			}
		}

		let mut triangles = Vec::with_capacity(2 * n * m);
		let idx = |i: usize, j: usize| (i * (m + 1) + j) as Index;
		for i in 0..n {
			for j in 0..m {
				let (a, b, c, d) = (idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1));
				triangles.push(Triangle { idxs: [a, b, c] });
				triangles.push(Triangle { idxs: [a, c, d] });
			}
		}

		Mesh::new(vertices, normals, uvs, triangles)
	}

	/// (p, q) torus knot: a thin tube wound `q` times around the Z axis while
	/// looping `p` times through a ring of radius 1.
	pub fn torus_knot(p: i32, q: i32, n: usize, m: usize) -> Result<Mesh, SceneError> {
		// tube radius and winding radius
		let r = 0.05;
		let r2 = 0.2;
		let (p, q) = (p as f64, q as f64);

		Mesh::parametric(n, m, |u, v| {
			let t = (u * 2.0 + 0.5) * PI;
			let o = (v * 2.0 - 1.0) * PI;
			let ring = 1.0 + r2 * (p * t).cos() + r * o.cos();
			let co = Vec3::new(
				ring * (q * t).cos(),
				ring * (q * t).sin(),
				r2 * (p * t).sin() + r * o.sin(),
			);
			let no = Vec3::new((q * t).cos() * o.cos(), (q * t).sin() * o.cos(), o.sin());
			(co, no)
		})
	}

	pub fn nb_triangles(&self) -> usize {
		self.triangles.len()
	}

	fn compute_edges(vertices: &[Vec3], triangles: &[Triangle]) -> (Vec<Vec3>, Vec<Vec3>) {
		// cache triangle edges
		let mut triangles_e1 = Vec::with_capacity(triangles.len());
		let mut triangles_e2 = Vec::with_capacity(triangles.len());
		for t in triangles {
			triangles_e1.push(vertices[t.idxs[1] as usize] - vertices[t.idxs[0] as usize]);
			triangles_e2.push(vertices[t.idxs[2] as usize] - vertices[t.idxs[0] as usize]);
		}
		(triangles_e1, triangles_e2)
	}

	/// Möller–Trumbore: solve `origin - v0 = -t dir + u e1 + v e2`.
	/// Returns (t, (u, v)) for front-facing hits inside the triangle.
	fn intersect_triangle(&self, ray: Ray, i: usize) -> Option<(f64, (f64, f64))> {
		let v0 = self.vertices[self.triangles[i].idxs[0] as usize];
		let edge1 = self.triangles_e1[i];
		let edge2 = self.triangles_e2[i];

		let p = Vec3::cross(ray.direction, edge2);
		let det = Vec3::dot(edge1, p);
		if det < BACKFACE_EPSILON {
			return None;
		}
		let idet = 1.0 / det;

		let t = ray.origin - v0;
		let u = Vec3::dot(t, p) * idet;
		if u < 0.0 || u > 1.0 {
			return None;
		}

		let q = Vec3::cross(t, edge1);
		let v = Vec3::dot(ray.direction, q) * idet;
		if v < 0.0 || (u + v) > 1.0 {
			return None;
		}

		Some((Vec3::dot(edge2, q) * idet, (u, v)))
	}
}

impl Surface for Mesh {
	fn intersect(&self, ray: Ray, hit: &mut Hit) -> bool {
		let mut best = None;
		let mut t_min = hit.t;
		for i in 0..self.triangles.len() {
			if let Some((t, uv)) = self.intersect_triangle(ray, i) {
				if t > EPSILON && t < t_min {
					t_min = t;
					best = Some((i, uv));
				}
			}
		}

		let (i, (u, v)) = match best {
			Some(b) => b,
			None => return false,
		};

		let idxs = self.triangles[i].idxs;
		let w = 1.0 - u - v;
		let n0 = self.normals[idxs[0] as usize];
		let n1 = self.normals[idxs[1] as usize];
		let n2 = self.normals[idxs[2] as usize];
		let n = (n0 * w + n1 * u + n2 * v).normalized();

		let uv0 = self.uvs[idxs[0] as usize];
		let uv1 = self.uvs[idxs[1] as usize];
		let uv2 = self.uvs[idxs[2] as usize];

		hit.t = t_min;
		hit.point = ray.point_at(t_min);
		hit.normal = n;
		hit.uv = (
			uv0.0 * w + uv1.0 * u + uv2.0 * v,
			uv0.1 * w + uv1.1 * u + uv2.1 * v,
		);
		true
	}
}
