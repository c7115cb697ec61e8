use maths_rs::prelude::*;

/// Vertex layout shared by all scene meshes: position, normal and texcoord
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct Vertex3D {
    pub position: Vec3f,
    pub normal: Vec3f,
    pub texcoord: Vec2f,
}

/// Cpu side geometry handed to `gfx::Device::create_mesh`
#[derive(Clone, Debug)]
pub struct MeshData {
    pub vertices: Vec<Vertex3D>,
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Number of indices to pass to `draw_indexed` for the whole mesh
    pub fn num_indices(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Appends a quad with corners in winding order and a shared facet normal
fn push_quad(mesh: &mut MeshData, corners: [Vec3f; 4], normal: Vec3f) {
    let base = mesh.vertices.len() as u16;
    let texcoords = [
        vec2f(0.0, 1.0),
        vec2f(1.0, 1.0),
        vec2f(1.0, 0.0),
        vec2f(0.0, 0.0)
    ];
    for i in 0..4 {
        mesh.vertices.push(Vertex3D {
            position: corners[i],
            normal,
            texcoord: texcoords[i]
        });
    }
    mesh.indices.extend_from_slice(&[
        base, base + 2, base + 1,
        base + 2, base, base + 3
    ]);
}

/// Appends a triangle with a normal computed from its winding
fn push_triangle(mesh: &mut MeshData, corners: [Vec3f; 3]) {
    let base = mesh.vertices.len() as u16;
    let normal = normalize(cross(corners[1] - corners[0], corners[2] - corners[0]));
    let texcoords = [
        vec2f(0.0, 1.0),
        vec2f(0.5, 0.0),
        vec2f(1.0, 1.0)
    ];
    for i in 0..3 {
        mesh.vertices.push(Vertex3D {
            position: corners[i],
            normal,
            texcoord: texcoords[i]
        });
    }
    mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
}

/// Create a faceted cube spanning -1 to 1 on each axis, 24 vertices and 36 indices
pub fn create_cube_mesh() -> MeshData {
    let mut mesh = MeshData {
        vertices: Vec::new(),
        indices: Vec::new()
    };

    // front (-z)
    push_quad(&mut mesh, [
        vec3f(-1.0, -1.0, -1.0),
        vec3f( 1.0, -1.0, -1.0),
        vec3f( 1.0,  1.0, -1.0),
        vec3f(-1.0,  1.0, -1.0)
    ], vec3f(0.0, 0.0, -1.0));

    // back (+z)
    push_quad(&mut mesh, [
        vec3f( 1.0, -1.0, 1.0),
        vec3f(-1.0, -1.0, 1.0),
        vec3f(-1.0,  1.0, 1.0),
        vec3f( 1.0,  1.0, 1.0)
    ], vec3f(0.0, 0.0, 1.0));

    // right (+x)
    push_quad(&mut mesh, [
        vec3f(1.0, -1.0, -1.0),
        vec3f(1.0, -1.0,  1.0),
        vec3f(1.0,  1.0,  1.0),
        vec3f(1.0,  1.0, -1.0)
    ], vec3f(1.0, 0.0, 0.0));

    // left (-x)
    push_quad(&mut mesh, [
        vec3f(-1.0, -1.0,  1.0),
        vec3f(-1.0, -1.0, -1.0),
        vec3f(-1.0,  1.0, -1.0),
        vec3f(-1.0,  1.0,  1.0)
    ], vec3f(-1.0, 0.0, 0.0));

    // top (+y)
    push_quad(&mut mesh, [
        vec3f(-1.0, 1.0, -1.0),
        vec3f( 1.0, 1.0, -1.0),
        vec3f( 1.0, 1.0,  1.0),
        vec3f(-1.0, 1.0,  1.0)
    ], vec3f(0.0, 1.0, 0.0));

    // bottom (-y)
    push_quad(&mut mesh, [
        vec3f(-1.0, -1.0,  1.0),
        vec3f( 1.0, -1.0,  1.0),
        vec3f( 1.0, -1.0, -1.0),
        vec3f(-1.0, -1.0, -1.0)
    ], vec3f(0.0, -1.0, 0.0));

    mesh
}

/// Create a square based pyramid with its base at y = -1 and apex at y = 1, 16 vertices and 18 indices
pub fn create_pyramid_mesh() -> MeshData {
    let mut mesh = MeshData {
        vertices: Vec::new(),
        indices: Vec::new()
    };

    let apex = vec3f(0.0, 1.0, 0.0);
    let base = [
        vec3f(-1.0, -1.0, -1.0),
        vec3f( 1.0, -1.0, -1.0),
        vec3f( 1.0, -1.0,  1.0),
        vec3f(-1.0, -1.0,  1.0)
    ];

    // base
    push_quad(&mut mesh, [base[3], base[2], base[1], base[0]], vec3f(0.0, -1.0, 0.0));

    // sides
    for i in 0..4 {
        let next = (i + 1) % 4;
        push_triangle(&mut mesh, [base[i], apex, base[next]]);
    }

    mesh
}
