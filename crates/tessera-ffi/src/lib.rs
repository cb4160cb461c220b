//! C ABI for `tessera-engine`.
//!
//! The host owns the window, the GPU device and the event loop. It creates an
//! engine with [`tessera_init`] (or [`tessera_init_with_path`]), feeds it input
//! and calls [`tessera_render`] once per displayed frame, and releases it with
//! [`tessera_free`]. See `include/tessera.h` for the C declarations.
//!
//! Every entry point tolerates a null handle and null strings (no-op, `false`
//! or null). Calls on one handle must not overlap: an overlapping call is
//! rejected with an error log and the neutral return value. A panic inside the
//! engine is caught here and reported the same way.

use std::ffi::{c_char, CStr, CString};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::ptr;
use std::sync::{Mutex, TryLockError};

use tessera_engine::logging::{init_logging, LoggingConfig};
use tessera_engine::{Engine, EngineConfig};

/// Opaque engine handle.
pub struct TesseraEngine {
    inner: Mutex<Inner>,
}

struct Inner {
    engine: Engine,
    /// Text returned by the last cut/copy, kept alive for the host.
    clipboard: Option<CString>,
}

// ── lifecycle ─────────────────────────────────────────────────────────────

/// Creates an engine with default configuration.
#[unsafe(no_mangle)]
pub extern "C" fn tessera_init() -> *mut TesseraEngine {
    create(None)
}

/// Creates an engine configured from a `tessera.toml` file or a directory
/// containing one. A missing or broken config falls back to defaults.
///
/// # Safety
/// `path` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_init_with_path(path: *const c_char) -> *mut TesseraEngine {
    let path = unsafe { string_arg(path) };
    create(path.as_deref().map(Path::new))
}

/// Releases an engine. Any clipboard pointer it returned becomes invalid.
///
/// # Safety
/// `handle` must be null or come from `tessera_init*`, and must not be used
/// afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_free(handle: *mut TesseraEngine) {
    if handle.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(handle) });
    log::debug!("engine released");
}

// ── frame driver ──────────────────────────────────────────────────────────

/// Advances time and draws into `pixels` (`width * height` RGBA8 pixels).
/// A null or short buffer skips the draw and leaves it untouched.
///
/// # Safety
/// `handle` must be null or live. `pixels` must be null or valid for writes of
/// `len` bytes for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_render(
    handle: *mut TesseraEngine,
    pixels: *mut u8,
    len: usize,
    width: u32,
    height: u32,
    anim_counter: usize,
) {
    let buffer: &mut [u8] = if pixels.is_null() {
        Default::default()
    } else {
        unsafe { std::slice::from_raw_parts_mut(pixels, len) }
    };
    unsafe {
        with_inner(handle, (), |i| {
            i.engine.render(buffer, width, height, anim_counter);
        })
    }
}

/// Advances time without drawing.
///
/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_update(handle: *mut TesseraEngine) {
    unsafe {
        with_inner(handle, (), |i| {
            i.engine.update();
        })
    }
}

/// Frame rate the host should render at right now; 0 for a null handle.
///
/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_target_fps(handle: *const TesseraEngine) -> u32 {
    unsafe { with_inner(handle, 0, |i| i.engine.target_frame_rate()) }
}

// ── input ─────────────────────────────────────────────────────────────────

/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_hover(handle: *mut TesseraEngine, x: f32, y: f32) -> bool {
    unsafe { with_inner(handle, false, |i| i.engine.hover(x, y)) }
}

/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_touch_down(handle: *mut TesseraEngine, x: f32, y: f32) -> bool {
    unsafe { with_inner(handle, false, |i| i.engine.touch_down(x, y)) }
}

/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_touch_dragged(handle: *mut TesseraEngine, x: f32, y: f32) -> bool {
    unsafe { with_inner(handle, false, |i| i.engine.touch_dragged(x, y)) }
}

/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_touch_up(handle: *mut TesseraEngine, x: f32, y: f32) -> bool {
    unsafe { with_inner(handle, false, |i| i.engine.touch_up(x, y)) }
}

/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_touch_wheel(handle: *mut TesseraEngine, dx: f32, dy: f32) -> bool {
    unsafe { with_inner(handle, false, |i| i.engine.touch_wheel(dx, dy)) }
}

/// Inserts a typed UTF-8 fragment. Invalid UTF-8 is replaced, not rejected.
///
/// # Safety
/// `handle` must be null or live; `text` null or NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_key_down(handle: *mut TesseraEngine, text: *const c_char) -> bool {
    let Some(text) = (unsafe { string_arg(text) }) else { return false };
    unsafe { with_inner(handle, false, |i| i.engine.key_down(&text)) }
}

/// Non-text key, `TESSERA_KEY_*`.
///
/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_special_key_down(handle: *mut TesseraEngine, code: u32) -> bool {
    unsafe { with_inner(handle, false, |i| i.engine.special_key_down(code)) }
}

// ── lifecycle requests ────────────────────────────────────────────────────

/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_open(handle: *mut TesseraEngine) {
    unsafe { with_inner(handle, (), |i| i.engine.open()) }
}

/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_undo(handle: *mut TesseraEngine) {
    unsafe {
        with_inner(handle, (), |i| {
            i.engine.undo();
        })
    }
}

/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_redo(handle: *mut TesseraEngine) {
    unsafe {
        with_inner(handle, (), |i| {
            i.engine.redo();
        })
    }
}

/// Removes the selection and returns it, or null without one.
///
/// The string is owned by the engine and stays valid until the next
/// `tessera_cut`/`tessera_copy` or `tessera_free`. Copy it immediately.
///
/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_cut(handle: *mut TesseraEngine) -> *const c_char {
    unsafe {
        with_inner(handle, ptr::null(), |i| {
            let text = i.engine.cut();
            i.hold_clipboard(text)
        })
    }
}

/// Returns the selection without changing it, or null without one. Same
/// lifetime rules as [`tessera_cut`].
///
/// # Safety
/// `handle` must be null or live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_copy(handle: *mut TesseraEngine) -> *const c_char {
    unsafe {
        with_inner(handle, ptr::null(), |i| {
            let text = i.engine.copy();
            i.hold_clipboard(text)
        })
    }
}

/// Inserts clipboard text at the caret. Null or empty text is a no-op.
///
/// # Safety
/// `handle` must be null or live; `text` null or NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tessera_paste(handle: *mut TesseraEngine, text: *const c_char) {
    let text = unsafe { string_arg(text) };
    unsafe {
        with_inner(handle, (), |i| {
            i.engine.paste(text.as_deref());
        })
    }
}

// ── private helpers ───────────────────────────────────────────────────────

impl Inner {
    /// Stores `text` for the host and returns a pointer into it.
    fn hold_clipboard(&mut self, text: Option<String>) -> *const c_char {
        // Interior NULs cannot cross as a C string.
        self.clipboard = text.and_then(|t| CString::new(t.replace('\0', "")).ok());
        self.clipboard.as_ref().map_or(ptr::null(), |c| c.as_ptr())
    }
}

fn create(path: Option<&Path>) -> *mut TesseraEngine {
    let loaded = path.map(EngineConfig::load);
    let filter = match &loaded {
        Some(Ok(config)) => config.logging.filter.clone(),
        _ => None,
    };
    init_logging(LoggingConfig::with_filter(filter));

    let config = match loaded {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            log::warn!("{err:#}; using default configuration");
            EngineConfig::default()
        }
        None => EngineConfig::default(),
    };

    match panic::catch_unwind(AssertUnwindSafe(|| Engine::with_config(config))) {
        Ok(engine) => Box::into_raw(Box::new(TesseraEngine {
            inner: Mutex::new(Inner { engine, clipboard: None }),
        })),
        Err(_) => {
            log::error!("engine initialization panicked");
            ptr::null_mut()
        }
    }
}

/// Runs `f` on the engine behind `handle`, or returns `fallback` when the
/// handle is null, already in use, or `f` panics.
///
/// # Safety
/// `handle` must be null or point to a live `TesseraEngine`.
unsafe fn with_inner<R>(
    handle: *const TesseraEngine,
    fallback: R,
    f: impl FnOnce(&mut Inner) -> R,
) -> R {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        return fallback;
    };
    let mut guard = match handle.inner.try_lock() {
        Ok(guard) => guard,
        Err(TryLockError::WouldBlock) => {
            log::error!("rejected overlapping call on engine handle");
            return fallback;
        }
        Err(TryLockError::Poisoned(poisoned)) => {
            log::warn!("engine lock poisoned by an earlier panic; continuing");
            poisoned.into_inner()
        }
    };
    match panic::catch_unwind(AssertUnwindSafe(|| f(&mut guard))) {
        Ok(value) => value,
        Err(_) => {
            log::error!("engine call panicked; returning neutral value");
            fallback
        }
    }
}

/// Owned copy of a C string argument; `None` for null.
///
/// # Safety
/// `p` must be null or NUL-terminated.
unsafe fn string_arg(p: *const c_char) -> Option<String> {
    if p.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(p) }.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_engine::editor::Mode;

    const W: u32 = 64;
    const H: u32 = 48;

    fn cstr(s: &str) -> CString {
        CString::new(s).unwrap()
    }

    fn copied(p: *const c_char) -> Option<String> {
        unsafe { string_arg(p) }
    }

    // ── handles ───────────────────────────────────────────────────────────

    #[test]
    fn null_handle_is_tolerated() {
        let null = ptr::null_mut();
        unsafe {
            tessera_render(null, ptr::null_mut(), 0, W, H, 0);
            tessera_update(null);
            assert_eq!(tessera_target_fps(null), 0);
            assert!(!tessera_hover(null, 1.0, 1.0));
            assert!(!tessera_key_down(null, cstr("x").as_ptr()));
            assert!(tessera_copy(null).is_null());
            tessera_paste(null, ptr::null());
            tessera_free(null);
        }
    }

    #[test]
    fn render_fills_buffer() {
        let h = tessera_init();
        assert!(!h.is_null());
        let mut px = vec![0u8; (W * H * 4) as usize];
        unsafe {
            tessera_render(h, px.as_mut_ptr(), px.len(), W, H, 0);
            tessera_free(h);
        }
        assert!(px.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn short_buffer_is_left_untouched() {
        let h = tessera_init();
        let mut px = vec![5u8; 16];
        unsafe {
            tessera_render(h, px.as_mut_ptr(), px.len(), W, H, 0);
            tessera_render(h, ptr::null_mut(), 0, W, H, 0);
            tessera_free(h);
        }
        assert!(px.iter().all(|&b| b == 5));
    }

    #[test]
    fn missing_config_path_still_initializes() {
        let path = cstr("/nonexistent/tessera");
        let h = unsafe { tessera_init_with_path(path.as_ptr()) };
        assert!(!h.is_null());
        unsafe {
            assert!(tessera_target_fps(h) > 0);
            tessera_free(h);
        }
    }

    // ── input and clipboard ───────────────────────────────────────────────

    #[test]
    fn touch_up_without_touch_down_is_false() {
        let h = tessera_init();
        unsafe {
            assert!(!tessera_touch_up(h, 10.0, 10.0));
            assert!(!tessera_touch_dragged(h, 10.0, 10.0));
            tessera_free(h);
        }
    }

    #[test]
    fn unknown_key_code_is_false() {
        let h = tessera_init();
        unsafe {
            assert!(!tessera_special_key_down(h, 9));
            assert!(tessera_special_key_down(h, 7));
            tessera_free(h);
        }
    }

    #[test]
    fn clipboard_round_trip() {
        let h = tessera_init();
        unsafe {
            tessera_paste(h, cstr("hello").as_ptr());
            assert!(tessera_copy(h).is_null());

            // Select the word by dragging across it under the default layout.
            let (x0, y0) = (19.0, 55.0);
            let x1 = x0 + 5.0 * cell_width(h);
            assert!(tessera_touch_down(h, x0, y0));
            assert!(tessera_touch_dragged(h, x1, y0));
            assert!(tessera_touch_up(h, x1, y0));

            assert_eq!(copied(tessera_copy(h)).as_deref(), Some("hello"));
            assert_eq!(copied(tessera_cut(h)).as_deref(), Some("hello"));
            assert!(tessera_cut(h).is_null());

            tessera_undo(h);
            tessera_redo(h);
            tessera_undo(h);
            assert_eq!(text(h), "hello");
            tessera_free(h);
        }
    }

    #[test]
    fn open_panel_takes_keys_until_escape() {
        let h = tessera_init();
        unsafe {
            tessera_open(h);
            assert_eq!(mode(h), Mode::Edit);
            tessera_update(h);
            assert_eq!(mode(h), Mode::Browser);

            assert!(!tessera_key_down(h, cstr("x").as_ptr()));
            assert_eq!(text(h), "");

            assert!(tessera_special_key_down(h, 0));
            assert_eq!(mode(h), Mode::Edit);
            assert!(tessera_key_down(h, cstr("x").as_ptr()));
            assert_eq!(text(h), "x");
            tessera_free(h);
        }
    }

    #[test]
    fn overlapping_call_is_rejected() {
        let h = tessera_init();
        unsafe {
            let guard = (*h).inner.lock().unwrap();
            assert!(!tessera_key_down(h, cstr("x").as_ptr()));
            assert_eq!(tessera_target_fps(h), 0);
            drop(guard);
            assert!(tessera_key_down(h, cstr("x").as_ptr()));
            tessera_free(h);
        }
    }

    unsafe fn cell_width(h: *mut TesseraEngine) -> f32 {
        unsafe { with_inner(h, 0.0, |i| i.engine.session().cell().x) }
    }

    unsafe fn mode(h: *mut TesseraEngine) -> Mode {
        unsafe { with_inner(h, Mode::Edit, |i| i.engine.session().mode()) }
    }

    unsafe fn text(h: *mut TesseraEngine) -> String {
        unsafe { with_inner(h, String::new(), |i| i.engine.session().document().text().to_owned()) }
    }
}
