use std::path::Path;

use image;
use log::info;
use wgpu;

use crate::error::Result;

pub const DIFFUSE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
// Normal maps hold vectors, not colours.
pub const NORMAL_MAP_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

pub const WHITE: [u8; 4] = [255, 255, 255, 255];
pub const FLAT_NORMAL: [u8; 4] = [128, 128, 255, 255];

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl Texture {
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &image::RgbaImage,
        label: &str,
        format: wgpu::TextureFormat,
    ) -> Self {
        let dimensions = rgba.dimensions();
        let texture_size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            size: texture_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            label: Some(label),
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            texture_size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
        format: wgpu::TextureFormat,
    ) -> Result<Self> {
        let path = path.as_ref();
        let rgba = image::open(path)?.to_rgba8();
        info!("[texture] Loaded texture: {}x{} from {}", rgba.width(), rgba.height(), path.display());
        Ok(Self::from_rgba(device, queue, &rgba, &path.display().to_string(), format))
    }

    /// 1x1 texture of a single colour.
    pub fn solid(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: [u8; 4],
        label: &str,
        format: wgpu::TextureFormat,
    ) -> Self {
        let pixel = image::RgbaImage::from_pixel(1, 1, image::Rgba(rgba));
        Self::from_rgba(device, queue, &pixel, label, format)
    }
}

/// Texture units seen by every shader variant: `texture1` (diffuse), `texture2`
/// (normal map) and their shared sampler.
pub struct TextureSet {
    pub bind_group: wgpu::BindGroup,
    pub count: usize,
}

impl TextureSet {
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Set Bind Group Layout"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    /// Nearest minification, linear magnification, repeat wrapping.
    pub fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Texture Set Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        })
    }

    /// Binds `textures` to consecutive units. A single texture is repeated in the
    /// normal-map unit; an empty slice falls back to `placeholders`.
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        textures: &[&Texture],
        placeholders: &Placeholders,
        label: &str,
    ) -> Self {
        let (texture1, texture2) = select_units(textures, (&placeholders.white, &placeholders.flat_normal));
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture1.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture2.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        Self {
            bind_group,
            count: textures.len().min(2),
        }
    }
}

/// Picks what goes in `texture1` and `texture2`. A single texture fills both
/// units; none at all falls back to `placeholders`.
pub fn select_units<'a, T>(textures: &[&'a T], placeholders: (&'a T, &'a T)) -> (&'a T, &'a T) {
    match textures {
        [] => placeholders,
        [only] => (*only, *only),
        [first, second, ..] => (*first, *second),
    }
}

pub struct Placeholders {
    pub white: Texture,
    pub flat_normal: Texture,
}

impl Placeholders {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self {
            white: Texture::solid(device, queue, WHITE, "White Placeholder", DIFFUSE_FORMAT),
            flat_normal: Texture::solid(device, queue, FLAT_NORMAL, "Flat Normal Placeholder", NORMAL_MAP_FORMAT),
        }
    }
}

/// Shader-side name of texture unit `unit` (0-based).
pub fn unit_name(unit: usize) -> String {
    format!("texture{}", unit + 1)
}

/// Format used when uploading the texture bound to `unit`.
pub fn unit_format(unit: usize) -> wgpu::TextureFormat {
    if unit == 0 {
        DIFFUSE_FORMAT
    } else {
        NORMAL_MAP_FORMAT
    }
}
