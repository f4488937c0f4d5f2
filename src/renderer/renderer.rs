use crate::error::BugError;
use crate::renderer::camera::CameraState;
use crate::renderer::vertex::{LineVertex, VERTEX_RECEIVES_SHADOW, Vertex};
use crate::scene::node::Scene;
use crate::settings::Settings;
use nalgebra_glm as glm;
use std::sync::Arc;
use wgpu::util::DeviceExt;

/// Shadow map resolution.
pub(crate) const SHADOW_MAP_SIZE: u32 = 512;

/// Directional light position; the light looks at the origin from here.
pub(crate) const SUN_POSITION: [f32; 3] = [200.0, 300.0, 100.0];

/// Linear fog range in world units.
pub(crate) const FOG_NEAR: f32 = 100.0;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub sun_view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LightUniform {
    pub sun_direction: [f32; 4],
    pub sun_color: [f32; 4],
    pub hemi_sky: [f32; 4],
    pub hemi_ground: [f32; 4],
    pub fog_color: [f32; 4],
    // x: fog far, y: shadows enabled
    pub params: [f32; 4],
}

/// One draw range in an asset's index buffer, per mesh node.
pub(crate) struct MeshDraw {
    pub index_start: u32,
    pub index_count: u32,
    pub cast_shadow: bool,
}

/// GPU buffers for one loaded asset. Vertices carry baked world transforms;
/// re-baking rewrites the vertex buffer in place, topology never changes.
pub(crate) struct AssetGeometry {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
    pub draws: Vec<MeshDraw>,
}

pub struct Renderer {
    pub(crate) surface: wgpu::Surface<'static>,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    pub(crate) config: wgpu::SurfaceConfiguration,
    pub(crate) mesh_pipeline: wgpu::RenderPipeline,
    pub(crate) wireframe_pipeline: wgpu::RenderPipeline,
    pub(crate) line_pipeline: wgpu::RenderPipeline,
    pub(crate) shadow_pipeline: wgpu::RenderPipeline,
    pub(crate) camera_buffer: wgpu::Buffer,
    pub(crate) camera_bind_group: wgpu::BindGroup,
    pub(crate) light_buffer: wgpu::Buffer,
    pub(crate) light_bind_group: wgpu::BindGroup,
    pub(crate) shadow_view: wgpu::TextureView,
    pub(crate) grid_vertex_buffer: wgpu::Buffer,
    pub(crate) num_grid_vertices: u32,
    pub(crate) bug_geometry: Option<AssetGeometry>,
    pub(crate) map_geometry: Option<AssetGeometry>,
    pub(crate) background_color: [f32; 3],
    pub(crate) fog_color: [f32; 3],
    pub(crate) hemi_sky_color: [f32; 3],
    pub(crate) hemi_ground_color: [f32; 3],
    pub(crate) sun_color: [f32; 3],
    pub camera: CameraState,
    pub(crate) egui_renderer: egui_wgpu::Renderer,
    egui_ctx: egui::Context,
}

impl Renderer {
    pub async fn new(window: Arc<winit::window::Window>) -> Result<Self, BugError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::POLYGON_MODE_LINE, // Required for wireframe mode
                required_limits: wgpu::Limits::default(),
                label: None,
                memory_hints: wgpu::MemoryHints::default(),
                ..Default::default()
            })
            .await
            .unwrap();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shader.wgsl").into()),
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        // Shadow map: depth-only target sampled with a comparison sampler
        let shadow_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Shadow Map"),
            size: wgpu::Extent3d {
                width: SHADOW_MAP_SIZE,
                height: SHADOW_MAP_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let shadow_view = shadow_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        let light_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Light Buffer"),
            size: size_of::<LightUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let light_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Light Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Depth,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                        count: None,
                    },
                ],
            });

        let light_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Light Bind Group"),
            layout: &light_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: light_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&shadow_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
        });

        let mesh_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &light_bind_group_layout],
            push_constant_ranges: &[],
        });

        // Lines and the shadow pass only need the camera
        let camera_only_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Camera Only Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Pipeline"),
            layout: Some(&mesh_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        // Wireframe pipeline - same as mesh pipeline but with Line mode
        let wireframe_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Wireframe Pipeline"),
            layout: Some(&mesh_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Line,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Pipeline"),
            layout: Some(&camera_only_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_line"),
                buffers: &[LineVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_line"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        // Depth-only pass into the shadow map, no fragment stage
        let shadow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shadow Pipeline"),
            layout: Some(&camera_only_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_shadow"),
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: None,
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                },
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let egui_ctx = egui::Context::default();
        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, Default::default());

        let grid_vertices = build_grid_vertices();
        let grid_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Vertex Buffer"),
            contents: bytemuck::cast_slice(&grid_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let num_grid_vertices = grid_vertices.len() as u32;

        let settings = Settings::load();
        Ok(Self {
            surface,
            device,
            queue,
            config,
            mesh_pipeline,
            wireframe_pipeline,
            line_pipeline,
            shadow_pipeline,
            camera_buffer,
            camera_bind_group,
            light_buffer,
            light_bind_group,
            shadow_view,
            grid_vertex_buffer,
            num_grid_vertices,
            bug_geometry: None,
            map_geometry: None,
            background_color: settings.colors.background_color,
            fog_color: settings.colors.fog_color,
            hemi_sky_color: settings.colors.hemi_sky_color,
            hemi_ground_color: settings.colors.hemi_ground_color,
            sun_color: settings.colors.sun_color,
            camera: CameraState::default(),
            egui_renderer,
            egui_ctx,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn egui_context(&self) -> egui::Context {
        self.egui_ctx.clone()
    }

    pub fn update_colors(&mut self, settings: &Settings) {
        self.background_color = settings.colors.background_color;
        self.fog_color = settings.colors.fog_color;
        self.hemi_sky_color = settings.colors.hemi_sky_color;
        self.hemi_ground_color = settings.colors.hemi_ground_color;
        self.sun_color = settings.colors.sun_color;
    }

    /// Upload the character geometry. Called once when the load completes.
    pub fn upload_bug(&mut self, scene: &Scene) {
        self.bug_geometry = Some(self.create_geometry(scene, "bug"));
    }

    /// Upload the map geometry. Called once when the load completes.
    pub fn upload_map(&mut self, scene: &Scene) {
        self.map_geometry = Some(self.create_geometry(scene, "map"));
    }

    /// Re-bake the character vertices after the pose driver moved its nodes.
    /// Topology is unchanged since upload, so this is a plain buffer rewrite.
    pub fn refresh_bug(&mut self, scene: &Scene) {
        if let Some(geometry) = &self.bug_geometry {
            let (vertices, _, _) = bake_scene(scene);
            self.queue
                .write_buffer(&geometry.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }
    }

    fn create_geometry(&self, scene: &Scene, label: &str) -> AssetGeometry {
        let (vertices, indices, draws) = bake_scene(scene);
        log::info!(
            "{label} geometry: {} vertices, {} triangles, {} draws",
            vertices.len(),
            indices.len() / 3,
            draws.len()
        );

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Asset Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Asset Index Buffer"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        AssetGeometry {
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
            draws,
        }
    }
}

/// Flatten a scene into world-space vertices, one draw range per mesh node.
pub(crate) fn bake_scene(scene: &Scene) -> (Vec<Vertex>, Vec<u32>, Vec<MeshDraw>) {
    let world = scene.world_matrices();
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut draws = Vec::new();

    for (idx, node) in scene.nodes.iter().enumerate() {
        if node.meshes.is_empty() {
            continue;
        }
        let matrix = world[idx];
        // Inverse transpose keeps normals correct under non-uniform scale
        let normal_matrix = glm::transpose(&glm::inverse(&glm::mat4_to_mat3(&matrix)));
        let flags = if node.receive_shadow {
            VERTEX_RECEIVES_SHADOW
        } else {
            0
        };

        for &mesh_id in &node.meshes {
            let mesh = &scene.meshes[mesh_id];
            let base = vertices.len() as u32;
            let index_start = indices.len() as u32;

            for (position, normal) in mesh.positions.iter().zip(&mesh.normals) {
                let p = matrix * glm::vec4(position[0], position[1], position[2], 1.0);
                let n = normal_matrix * glm::vec3(normal[0], normal[1], normal[2]);
                let n = glm::normalize(&n);
                vertices.push(Vertex {
                    position: [p.x, p.y, p.z],
                    normal: [n.x, n.y, n.z],
                    color: mesh.base_color,
                    flags,
                });
            }
            indices.extend(mesh.indices.iter().map(|&i| base + i));
            draws.push(MeshDraw {
                index_start,
                index_count: mesh.indices.len() as u32,
                cast_shadow: node.cast_shadow,
            });
        }
    }
    (vertices, indices, draws)
}

/// Ground-plane reference grid: minor lines every unit, major every five.
pub(crate) fn build_grid_vertices() -> Vec<LineVertex> {
    const EXTENT: f32 = 20.0;
    const MINOR_COLOR: [f32; 3] = [0.55, 0.55, 0.55];
    const MAJOR_COLOR: [f32; 3] = [0.42, 0.42, 0.42];

    let mut line_vertices = Vec::new();
    for i in -20..=20 {
        let pos = i as f32;
        let color = if i % 5 == 0 { MAJOR_COLOR } else { MINOR_COLOR };
        line_vertices.push(LineVertex {
            position: [pos, 0.0, -EXTENT],
            color,
        });
        line_vertices.push(LineVertex {
            position: [pos, 0.0, EXTENT],
            color,
        });
        line_vertices.push(LineVertex {
            position: [-EXTENT, 0.0, pos],
            color,
        });
        line_vertices.push(LineVertex {
            position: [EXTENT, 0.0, pos],
            color,
        });
    }
    line_vertices
}

/// View-projection of the directional light used for the shadow pass.
pub(crate) fn sun_view_proj() -> glm::Mat4 {
    let direction = glm::normalize(&glm::vec3(
        SUN_POSITION[0],
        SUN_POSITION[1],
        SUN_POSITION[2],
    ));
    let eye = direction * 60.0;
    let view = glm::look_at_rh(&eye, &glm::Vec3::zeros(), &glm::vec3(0.0, 1.0, 0.0));
    let proj = glm::ortho_rh_zo(-25.0, 25.0, -25.0, 25.0, 1.0, 150.0);
    proj * view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::mesh::MeshData;
    use crate::scene::node::Node;

    #[test]
    fn baking_applies_node_transforms_and_shadow_flags() {
        let mut scene = Scene::default();
        scene.meshes.push(MeshData {
            name: "tri".into(),
            positions: vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            normals: vec![[0.0, 1.0, 0.0]; 3],
            indices: vec![0, 1, 2],
            base_color: [0.5, 0.5, 0.5],
        });
        let mut node = Node::new("tri".into());
        node.meshes = vec![0];
        node.translation = glm::vec3(0.0, 2.0, 0.0);
        node.receive_shadow = true;
        scene.nodes.push(node);
        scene.roots.push(0);

        let (vertices, indices, draws) = bake_scene(&scene);
        assert_eq!(vertices.len(), 3);
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(draws.len(), 1);
        assert!(!draws[0].cast_shadow);
        assert_eq!(vertices[0].position, [1.0, 2.0, 0.0]);
        assert_eq!(vertices[0].flags, VERTEX_RECEIVES_SHADOW);
    }

    #[test]
    fn grid_lines_come_in_pairs() {
        let grid = build_grid_vertices();
        assert!(!grid.is_empty());
        assert_eq!(grid.len() % 2, 0);
    }
}
