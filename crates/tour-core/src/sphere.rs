use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PanoramaVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed triangle mesh for the background sphere.
#[derive(Clone, Debug, Default)]
pub struct SphereMesh {
    pub vertices: Vec<PanoramaVertex>,
    pub indices: Vec<u32>,
}

/// Build a UV sphere meant to be seen from the inside.
///
/// Rows run from the north pole (v = 0, top of the image) to the south pole.
/// Columns sweep the full azimuth with x mirrored, so an equirectangular
/// image reads left-to-right from the centre. Pole rows emit a single
/// triangle per quad. Draw without back-face culling.
pub fn build_panorama_sphere(radius: f32, width_segments: u32, height_segments: u32) -> SphereMesh {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut vertices = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let polar = v * std::f32::consts::PI;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let azimuth = u * std::f32::consts::TAU;
            // mirrored in x
            let x = radius * azimuth.cos() * polar.sin();
            let y = radius * polar.cos();
            let z = radius * azimuth.sin() * polar.sin();
            vertices.push(PanoramaVertex {
                position: [x, y, z],
                uv: [u, v],
            });
        }
    }

    let row = ws + 1;
    let mut indices = Vec::with_capacity((ws * hs * 6) as usize);
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    SphereMesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn every_vertex_on_the_sphere() {
        let mesh = build_panorama_sphere(1000.0, 16, 8);
        assert_eq!(mesh.vertices.len(), 17 * 9);
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            assert_relative_eq!((x * x + y * y + z * z).sqrt(), 1000.0, epsilon = 0.05);
            assert!((0.0..=1.0).contains(&v.uv[0]) && (0.0..=1.0).contains(&v.uv[1]));
        }
    }

    #[test]
    fn indices_stay_in_range_and_skip_pole_slivers() {
        let mesh = build_panorama_sphere(1.0, 16, 8);
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
        // two triangles per quad, minus one per quad on each pole row
        assert_eq!(mesh.indices.len(), (16 * 8 * 2 - 16 * 2) * 3);
    }

    #[test]
    fn image_centre_faces_panorama_front() {
        let mesh = build_panorama_sphere(1.0, 4, 2);
        // equator row, u = 0.5
        let centre = mesh.vertices[(5 + 2) as usize];
        assert_eq!(centre.uv, [0.5, 0.5]);
        assert_relative_eq!(centre.position[0], -1.0, epsilon = 1e-5);
    }
}
