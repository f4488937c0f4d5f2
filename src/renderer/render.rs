use crate::renderer::renderer::{CameraUniform, FOG_NEAR, LightUniform, Renderer, SUN_POSITION, sun_view_proj};
use egui_wgpu::ScreenDescriptor;
use nalgebra_glm as glm;

impl Renderer {
    pub fn render(
        &mut self,
        show_grid: bool,
        wireframe_mode: bool,
        show_shadows: bool,
        far_plane: f32,
        paint_jobs: Vec<egui::ClippedPrimitive>,
        textures_delta: egui::TexturesDelta,
        screen_descriptor: ScreenDescriptor,
    ) -> Result<(), wgpu::SurfaceError> {
        // Skip rendering if window size is invalid (minimized, not ready, etc.)
        if self.config.width == 0 || self.config.height == 0 {
            return Ok(());
        }

        let aspect = self.config.width as f32 / self.config.height as f32;
        let proj = glm::perspective_rh_zo(aspect, 45.0_f32.to_radians(), 0.1, far_plane);

        let eye_pos = self.camera.eye();
        let eye = glm::vec3(eye_pos[0], eye_pos[1], eye_pos[2]);
        let center = glm::vec3(
            self.camera.target[0],
            self.camera.target[1],
            self.camera.target[2],
        );
        let up = glm::vec3(0.0, 1.0, 0.0);
        let view = glm::look_at_rh(&eye, &center, &up);

        let camera_uniform = CameraUniform {
            view_proj: (proj * view).into(),
            sun_view_proj: sun_view_proj().into(),
            eye: [eye.x, eye.y, eye.z, 1.0],
        };
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera_uniform]),
        );

        let sun_direction = glm::normalize(&glm::vec3(
            SUN_POSITION[0],
            SUN_POSITION[1],
            SUN_POSITION[2],
        ));
        let light_uniform = LightUniform {
            sun_direction: [sun_direction.x, sun_direction.y, sun_direction.z, 0.0],
            sun_color: [self.sun_color[0], self.sun_color[1], self.sun_color[2], 1.0],
            hemi_sky: [
                self.hemi_sky_color[0],
                self.hemi_sky_color[1],
                self.hemi_sky_color[2],
                1.0,
            ],
            hemi_ground: [
                self.hemi_ground_color[0],
                self.hemi_ground_color[1],
                self.hemi_ground_color[2],
                1.0,
            ],
            fog_color: [
                self.fog_color[0],
                self.fog_color[1],
                self.fog_color[2],
                FOG_NEAR,
            ],
            params: [far_plane, if show_shadows { 1.0 } else { 0.0 }, 0.0, 0.0],
        };
        self.queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::cast_slice(&[light_uniform]),
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let depth_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: self.config.width,
                height: self.config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // Shadow pass: depth only, from the sun. Cleared every frame so a
        // disabled pass leaves no stale shadows behind.
        {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if show_shadows {
                shadow_pass.set_pipeline(&self.shadow_pipeline);
                shadow_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                for geometry in self.map_geometry.iter().chain(self.bug_geometry.iter()) {
                    shadow_pass.set_vertex_buffer(0, geometry.vertex_buffer.slice(..));
                    shadow_pass
                        .set_index_buffer(geometry.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    for draw in &geometry.draws {
                        if draw.cast_shadow {
                            shadow_pass.draw_indexed(
                                draw.index_start..(draw.index_start + draw.index_count),
                                0,
                                0..1,
                            );
                        }
                    }
                }
            }
        }

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.background_color[0] as f64,
                            g: self.background_color[1] as f64,
                            b: self.background_color[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if show_grid {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.grid_vertex_buffer.slice(..));
                render_pass.draw(0..self.num_grid_vertices, 0..1);
            }

            let mesh_pipeline = if wireframe_mode {
                &self.wireframe_pipeline
            } else {
                &self.mesh_pipeline
            };
            render_pass.set_pipeline(mesh_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_bind_group(1, &self.light_bind_group, &[]);

            for geometry in self.map_geometry.iter().chain(self.bug_geometry.iter()) {
                if geometry.num_indices == 0 {
                    continue;
                }
                render_pass.set_vertex_buffer(0, geometry.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(geometry.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..geometry.num_indices, 0, 0..1);
            }
        }

        // Render egui properly
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let mut egui_rpass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui render pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut egui_rpass, &paint_jobs, &screen_descriptor);
        }

        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
