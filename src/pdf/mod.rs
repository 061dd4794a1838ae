mod content;

use std::collections::{BTreeSet, HashMap};

use pdf_writer::{Filter, Name, Pdf, Rect, Ref};

use crate::fonts::{FontEntry, register_font};
use crate::model::FontFace;
use crate::surface::{Command, Document, RasterImage};

use content::{alpha_key, build_page_content};

fn embed_image(pdf: &mut Pdf, img: &RasterImage, alloc: &mut impl FnMut() -> Ref) -> Ref {
    let xobj_ref = alloc();
    let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&img.rgb, 6);

    let smask_ref = img.alpha.as_ref().map(|alpha| {
        let compressed_alpha = miniz_oxide::deflate::compress_to_vec_zlib(alpha, 6);
        let mask_ref = alloc();
        let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(img.width as i32);
        mask.height(img.height as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask_ref
    });

    let mut xobj = pdf.image_xobject(xobj_ref, &compressed_rgb);
    xobj.filter(Filter::FlateDecode);
    xobj.width(img.width as i32);
    xobj.height(img.height as i32);
    xobj.color_space().device_rgb();
    xobj.bits_per_component(8);
    if let Some(mask_ref) = smask_ref {
        xobj.s_mask(mask_ref);
    }
    xobj_ref
}

impl Document {
    /// Serialize the recorded pages into a PDF file.
    pub fn to_pdf(&self) -> Vec<u8> {
        let t0 = std::time::Instant::now();
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();

        // Phase 1: shared resources
        let fonts: Vec<FontEntry> = [FontFace::Regular, FontFace::Bold]
            .into_iter()
            .map(|face| register_font(&mut pdf, face, &mut alloc))
            .collect();

        let alphas: BTreeSet<u32> = self
            .pages
            .iter()
            .flat_map(|p| p.commands.iter())
            .filter_map(|c| match c {
                Command::SetOpacity(a) => Some(alpha_key(*a)),
                _ => None,
            })
            .collect();
        let mut gs_names: HashMap<u32, String> = HashMap::new();
        let mut gs_refs: Vec<(String, Ref)> = Vec::new();
        for (i, key) in alphas.into_iter().enumerate() {
            let gs_ref = alloc();
            let alpha = key as f32 / 1000.0;
            pdf.ext_graphics(gs_ref)
                .non_stroking_alpha(alpha)
                .stroking_alpha(alpha);
            let name = format!("GS{}", i + 1);
            gs_names.insert(key, name.clone());
            gs_refs.push((name, gs_ref));
        }

        let mut image_names: Vec<String> = Vec::with_capacity(self.images.len());
        let mut image_xobjects: Vec<(String, Ref)> = Vec::with_capacity(self.images.len());
        for (i, img) in self.images.iter().enumerate() {
            let xobj_ref = embed_image(&mut pdf, img, &mut alloc);
            let name = format!("Im{}", i + 1);
            image_names.push(name.clone());
            image_xobjects.push((name, xobj_ref));
        }

        let t_resources = t0.elapsed();

        // Phase 2: one content stream per page
        let n = self.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        for (i, page) in self.pages.iter().enumerate() {
            let content =
                build_page_content(page, self.page_size.height, &image_names, &gs_names);
            let raw = content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
        }

        // Phase 3: page tree
        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        for i in 0..n {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, self.page_size.width, self.page_size.height))
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            {
                let mut font_dict = resources.fonts();
                for entry in &fonts {
                    font_dict.pair(Name(entry.pdf_name.as_bytes()), entry.font_ref);
                }
            }
            if !image_xobjects.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, xobj_ref) in &image_xobjects {
                    xobjects.pair(Name(name.as_bytes()), *xobj_ref);
                }
            }
            if !gs_refs.is_empty() {
                let mut states = resources.ext_g_states();
                for (name, gs_ref) in &gs_refs {
                    states.pair(Name(name.as_bytes()), *gs_ref);
                }
            }
        }

        let bytes = pdf.finish();
        log::info!(
            "PDF assembly: pages={}, images={}, resources={:.1}ms, total={:.1}ms (output {} bytes)",
            n,
            self.images.len(),
            t_resources.as_secs_f64() * 1000.0,
            t0.elapsed().as_secs_f64() * 1000.0,
            bytes.len(),
        );
        bytes
    }
}
