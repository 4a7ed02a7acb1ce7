//! A mounted panorama viewer: session state, GPU renderer and frame loop.

use crate::dom;
use crate::frame::FrameLoop;
use crate::loader;
use crate::render::PanoramaGpu;
use crate::surface::{DomSurface, HostHooks};
use instant::Instant;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tour_core::{Orientation, ViewerProps, ViewerSession, ViewerSettings, Viewport};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub struct ViewerInner {
    pub session: ViewerSession<DomSurface>,
    pub gpu: Option<PanoramaGpu>,
}

/// Owning handle; dropping it unmounts the viewer.
pub struct ViewerHandle {
    inner: Rc<RefCell<ViewerInner>>,
    frame_loop: Option<FrameLoop>,
}

pub fn mount(
    mount_el: &web::HtmlElement,
    props: ViewerProps,
    settings: ViewerSettings,
    orientation: Option<Orientation>,
    hooks: HostHooks,
) -> anyhow::Result<ViewerHandle> {
    let surface = DomSurface::new(mount_el, hooks)?;
    let canvas = surface.canvas().clone();
    dom::sync_canvas_backing_size(&canvas);
    let uri = props.panorama.clone();

    let inner = Rc::new_cyclic(move |weak: &Weak<RefCell<ViewerInner>>| {
        let mut surface = surface;
        surface.bind(weak.clone());
        RefCell::new(ViewerInner {
            session: ViewerSession::mount(props, settings, orientation, surface),
            gpu: None,
        })
    });

    let settings = inner.borrow().session.controller().settings().clone();
    spawn_local(load(Rc::downgrade(&inner), canvas.clone(), uri, settings));

    let weak = Rc::downgrade(&inner);
    let frame_loop = FrameLoop::start(move || match weak.upgrade() {
        Some(inner) => draw_frame(&inner, &canvas),
        None => false,
    });

    Ok(ViewerHandle {
        inner,
        frame_loop: Some(frame_loop),
    })
}

/// Returns false when the viewer no longer needs frames.
fn draw_frame(inner: &RefCell<ViewerInner>, canvas: &web::HtmlCanvasElement) -> bool {
    let Ok(mut guard) = inner.try_borrow_mut() else {
        return true;
    };
    let ViewerInner { session, gpu } = &mut *guard;
    if !session.wants_frames() {
        return false;
    }
    let rect = session.surface().mount().get_bounding_client_rect();
    session.resize(Viewport::new(rect.width() as f32, rect.height() as f32));
    let Some(view_proj) = session.frame() else {
        return true;
    };
    let Some(gpu) = gpu.as_mut() else {
        return true;
    };
    let (w, h) = dom::sync_canvas_backing_size(canvas);
    gpu.resize_if_needed(w, h);
    match gpu.render(view_proj) {
        Ok(()) => {}
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
        Err(e) => log::error!("[render] frame skipped: {:?}", e),
    }
    true
}

async fn load(
    weak: Weak<RefCell<ViewerInner>>,
    canvas: web::HtmlCanvasElement,
    uri: String,
    settings: ViewerSettings,
) {
    let started = Instant::now();
    let progress_target = weak.clone();
    let result = async {
        let gpu = PanoramaGpu::new(canvas, &settings).await?;
        let bitmap = loader::fetch_panorama(&uri, move |loaded, total| {
            if let Some(inner) = progress_target.upgrade() {
                if let Ok(mut guard) = inner.try_borrow_mut() {
                    guard.session.report_progress(loaded, total);
                }
            }
        })
        .await?;
        Ok::<_, anyhow::Error>((gpu, bitmap))
    }
    .await;

    let Some(inner) = weak.upgrade() else {
        log::debug!("[viewer] {} finished loading after unmount", uri);
        return;
    };
    let mut guard = inner.borrow_mut();
    if !guard.session.is_mounted() {
        return;
    }
    match result {
        Ok((mut gpu, bitmap)) => {
            let uploaded = gpu.set_panorama(&bitmap);
            bitmap.close();
            match uploaded {
                Ok(()) => {
                    guard.gpu = Some(gpu);
                    guard.session.finish_loading();
                    log::info!(
                        "[viewer] {} ready in {} ms",
                        uri,
                        started.elapsed().as_millis()
                    );
                }
                Err(e) => {
                    guard.session.fail_loading(format!("{:#}", e));
                }
            }
        }
        Err(e) => {
            guard.session.fail_loading(format!("{:#}", e));
        }
    }
}

impl ViewerHandle {
    pub fn set_auto_rotate(&self, on: bool) {
        self.inner.borrow_mut().session.set_auto_rotate(on);
    }

    /// Stop rendering and remove everything the viewer added to the page.
    /// Returns the final orientation.
    pub fn unmount(mut self) -> Orientation {
        self.teardown()
    }

    fn teardown(&mut self) -> Orientation {
        if let Some(mut frame_loop) = self.frame_loop.take() {
            frame_loop.stop();
        }
        let mut inner = self.inner.borrow_mut();
        let orientation = inner.session.unmount();
        inner.gpu = None;
        orientation
    }
}

impl Drop for ViewerHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}
