// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! C-compatible bindings for the physim scene codec.
//!
//! Hosts exchange whole scene state as buffers of 32-bit words and drive the
//! simulation by calling the tick entry point once per step. Two surfaces are
//! exposed: opaque scene handles (`physim_scene_*`) and a process-wide scene
//! reachable through the classic `initScene`/`getAllData`/`sendAllData`/
//! `tickScene` entry points.
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![allow(non_camel_case_types)]

use std::os::raw::c_char;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::slice;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

use physim_core::{demo, CodecError, Scene, SharedScene};
use tracing::{error, warn};

/// Result code returned by every entry point.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum physim_status {
    /// Success.
    Ok = 0,
    /// A required pointer argument was null.
    NullPointer = 1,
    /// Decoded data violated a geometry invariant.
    Validation = 2,
    /// The buffer ended before its declared counts were satisfied.
    Truncated = 3,
    /// The buffer was otherwise malformed (trailing words, bad sizes).
    Malformed = 4,
    /// A declared count exceeded the configured decode limits.
    LimitExceeded = 5,
    /// An internal panic was caught at the boundary.
    Panic = 6,
}

impl From<&CodecError> for physim_status {
    fn from(err: &CodecError) -> Self {
        match err {
            CodecError::Validation(_) => Self::Validation,
            CodecError::Truncated(_) => Self::Truncated,
            CodecError::LimitExceeded { .. } | CodecError::CountTooLarge { .. } => {
                Self::LimitExceeded
            }
            _ => Self::Malformed,
        }
    }
}

impl<T> From<Result<T, CodecError>> for physim_status {
    fn from(result: Result<T, CodecError>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(err) => {
                warn!(%err, "scene call failed");
                Self::from(&err)
            }
        }
    }
}

/// Opaque scene handle exposed over the C ABI.
pub struct PhysimScene {
    inner: Scene,
}

/// Runs `f`, converting a panic into [`physim_status::Panic`].
fn guarded(f: impl FnOnce() -> physim_status) -> physim_status {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        error!("panic caught at the C boundary");
        physim_status::Panic
    })
}

/// Borrows `words` words at `data`.
///
/// # Safety
/// `data` must be non-null and valid for reads of `words` `u32`s for `'a`.
unsafe fn input<'a>(data: *const u32, words: usize) -> &'a [u32] {
    unsafe { slice::from_raw_parts(data, words) }
}

/// Hands `buffer` to the caller through the two out-pointers.
///
/// # Safety
/// Both pointers must be non-null and valid for writes.
unsafe fn hand_out(buffer: Vec<u32>, out_data: *mut *mut u32, out_words: *mut usize) {
    let words = buffer.len();
    let data = Box::into_raw(buffer.into_boxed_slice()).cast::<u32>();
    unsafe {
        *out_data = data;
        *out_words = words;
    }
}

/// Creates an empty scene with default settings.
///
/// The caller owns the returned pointer and must release it via
/// [`physim_scene_free`].
#[no_mangle]
pub extern "C" fn physim_scene_new() -> *mut PhysimScene {
    Box::into_raw(Box::new(PhysimScene {
        inner: Scene::new(),
    }))
}

/// Releases a scene created by [`physim_scene_new`].
///
/// # Safety
/// `scene` must be a pointer previously returned by [`physim_scene_new`] that
/// has not already been freed.
#[no_mangle]
pub unsafe extern "C" fn physim_scene_free(scene: *mut PhysimScene) {
    if scene.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(scene));
    }
}

/// Initial load of scene state from `words` words at `data`.
///
/// # Safety
/// `scene` must be a live handle; `data` must be valid for reads of `words`
/// words.
#[no_mangle]
pub unsafe extern "C" fn physim_scene_init(
    scene: *mut PhysimScene,
    data: *const u32,
    words: usize,
) -> physim_status {
    if scene.is_null() || data.is_null() {
        return physim_status::NullPointer;
    }
    guarded(|| {
        let scene = unsafe { &mut *scene };
        let buffer = unsafe { input(data, words) };
        scene.inner.init_all_data(buffer).into()
    })
}

/// Replaces (or appends, per the scene's decode mode) objects from a buffer.
///
/// # Safety
/// Same requirements as [`physim_scene_init`].
#[no_mangle]
pub unsafe extern "C" fn physim_scene_send(
    scene: *mut PhysimScene,
    data: *const u32,
    words: usize,
) -> physim_status {
    if scene.is_null() || data.is_null() {
        return physim_status::NullPointer;
    }
    guarded(|| {
        let scene = unsafe { &mut *scene };
        let buffer = unsafe { input(data, words) };
        scene.inner.set_all_data(buffer).into()
    })
}

/// Encodes the scene into a new buffer owned by the caller.
///
/// On success `*out_data` points at `*out_words` words, to be released with
/// [`physim_buffer_free`]. On failure the out-pointers are left untouched.
///
/// # Safety
/// `scene` must be a live handle; both out-pointers must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn physim_scene_get_all_data(
    scene: *const PhysimScene,
    out_data: *mut *mut u32,
    out_words: *mut usize,
) -> physim_status {
    if scene.is_null() || out_data.is_null() || out_words.is_null() {
        return physim_status::NullPointer;
    }
    guarded(|| {
        let scene = unsafe { &*scene };
        match scene.inner.drop_all_data() {
            Ok(buffer) => {
                unsafe { hand_out(buffer, out_data, out_words) };
                physim_status::Ok
            }
            Err(err) => Err::<(), _>(err).into(),
        }
    })
}

/// Ticks every object once.
///
/// # Safety
/// `scene` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn physim_scene_tick(scene: *mut PhysimScene, delta: f64) -> physim_status {
    if scene.is_null() {
        return physim_status::NullPointer;
    }
    guarded(|| {
        let scene = unsafe { &mut *scene };
        scene.inner.physics_tick(delta);
        physim_status::Ok
    })
}

/// Writes the number of objects to `out_len`.
///
/// # Safety
/// `scene` must be a live handle; `out_len` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn physim_scene_len(
    scene: *const PhysimScene,
    out_len: *mut usize,
) -> physim_status {
    if scene.is_null() || out_len.is_null() {
        return physim_status::NullPointer;
    }
    guarded(|| {
        let scene = unsafe { &*scene };
        unsafe {
            *out_len = scene.inner.len();
        }
        physim_status::Ok
    })
}

/// Appends the single-triangle diagnostic object.
///
/// # Safety
/// `scene` must be a live handle.
#[no_mangle]
pub unsafe extern "C" fn physim_scene_add_demo_object(scene: *mut PhysimScene) -> physim_status {
    if scene.is_null() {
        return physim_status::NullPointer;
    }
    guarded(|| {
        let scene = unsafe { &mut *scene };
        scene.inner.add_object(demo::triangle_object());
        physim_status::Ok
    })
}

/// Releases a buffer returned by [`getAllData`] or [`physim_scene_get_all_data`].
///
/// # Safety
/// `data` and `words` must be exactly the pair handed out, not yet freed.
/// A null `data` is ignored.
#[no_mangle]
pub unsafe extern "C" fn physim_buffer_free(data: *mut u32, words: usize) {
    if data.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(ptr::slice_from_raw_parts_mut(data, words)));
    }
}

/// Static, NUL-terminated description of `status`.
#[no_mangle]
pub extern "C" fn physim_status_message(status: physim_status) -> *const c_char {
    let message = match status {
        physim_status::Ok => c"ok",
        physim_status::NullPointer => c"null pointer argument",
        physim_status::Validation => c"geometry validation failed",
        physim_status::Truncated => c"buffer truncated",
        physim_status::Malformed => c"buffer malformed",
        physim_status::LimitExceeded => c"decode limit exceeded",
        physim_status::Panic => c"internal panic",
    };
    message.as_ptr()
}

// ── Process-wide scene ──────────────────────────────────────────────

static MAIN_SCENE: OnceLock<SharedScene> = OnceLock::new();
static TESTER_CALLS: AtomicU8 = AtomicU8::new(0);

fn main_scene() -> &'static SharedScene {
    MAIN_SCENE.get_or_init(SharedScene::new)
}

/// Initial load of the process-wide scene.
///
/// # Safety
/// `data` must be valid for reads of `words` words.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn initScene(data: *const u32, words: usize) -> physim_status {
    if data.is_null() {
        return physim_status::NullPointer;
    }
    guarded(|| {
        let buffer = unsafe { input(data, words) };
        main_scene().init_all_data(buffer).into()
    })
}

/// Installs objects decoded from a buffer into the process-wide scene.
///
/// # Safety
/// `data` must be valid for reads of `words` words.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn sendAllData(data: *const u32, words: usize) -> physim_status {
    if data.is_null() {
        return physim_status::NullPointer;
    }
    guarded(|| {
        let buffer = unsafe { input(data, words) };
        main_scene().set_all_data(buffer).into()
    })
}

/// Encodes the process-wide scene into a buffer owned by the caller.
///
/// # Safety
/// Both out-pointers must be valid for writes. Release the buffer with
/// [`physim_buffer_free`].
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn getAllData(out_data: *mut *mut u32, out_words: *mut usize) -> physim_status {
    if out_data.is_null() || out_words.is_null() {
        return physim_status::NullPointer;
    }
    guarded(|| match main_scene().drop_all_data() {
        Ok(buffer) => {
            unsafe { hand_out(buffer, out_data, out_words) };
            physim_status::Ok
        }
        Err(err) => Err::<(), _>(err).into(),
    })
}

/// Ticks every object of the process-wide scene once.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn tickScene(delta: f64) -> physim_status {
    guarded(|| {
        main_scene().physics_tick(delta);
        physim_status::Ok
    })
}

/// Diagnostic: appends the triangle object to the process-wide scene and
/// returns how many times this has been called, wrapping at 256.
#[no_mangle]
pub extern "C" fn tester() -> u8 {
    let outcome = panic::catch_unwind(|| main_scene().add_object(demo::triangle_object()));
    if outcome.is_err() {
        error!("panic caught in tester");
    }
    TESTER_CALLS.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::sync::Mutex;

    // Serializes tests touching the process-wide scene.
    static MAIN_LOCK: Mutex<()> = Mutex::new(());

    unsafe fn take(out_data: *mut u32, out_words: usize) -> Vec<u32> {
        let copy = unsafe { slice::from_raw_parts(out_data, out_words) }.to_vec();
        unsafe { physim_buffer_free(out_data, out_words) };
        copy
    }

    #[test]
    fn handle_round_trip_between_two_scenes() {
        unsafe {
            let a = physim_scene_new();
            assert_eq!(physim_scene_add_demo_object(a), physim_status::Ok);
            assert_eq!(physim_scene_add_demo_object(a), physim_status::Ok);

            let mut data = ptr::null_mut();
            let mut words = 0usize;
            assert_eq!(
                physim_scene_get_all_data(a, &mut data, &mut words),
                physim_status::Ok
            );
            let buffer = take(data, words);
            assert_eq!(buffer[0], 2);

            let b = physim_scene_new();
            assert_eq!(
                physim_scene_init(b, buffer.as_ptr(), buffer.len()),
                physim_status::Ok
            );
            let mut len = 0usize;
            assert_eq!(physim_scene_len(b, &mut len), physim_status::Ok);
            assert_eq!(len, 2);
            assert_eq!(physim_scene_tick(b, 1.0 / 60.0), physim_status::Ok);

            assert_eq!(
                physim_scene_get_all_data(b, &mut data, &mut words),
                physim_status::Ok
            );
            assert_eq!(take(data, words), buffer);

            physim_scene_free(a);
            physim_scene_free(b);
        }
    }

    #[test]
    fn bad_buffers_map_to_status_codes() {
        unsafe {
            let scene = physim_scene_new();
            physim_scene_add_demo_object(scene);
            let mut data = ptr::null_mut();
            let mut words = 0usize;
            physim_scene_get_all_data(scene, &mut data, &mut words);
            let mut buffer = take(data, words);

            assert_eq!(
                physim_scene_send(scene, buffer.as_ptr(), buffer.len() - 1),
                physim_status::Truncated
            );
            buffer.push(0);
            assert_eq!(
                physim_scene_send(scene, buffer.as_ptr(), buffer.len()),
                physim_status::Malformed
            );
            let huge = [u32::MAX];
            assert_eq!(
                physim_scene_send(scene, huge.as_ptr(), huge.len()),
                physim_status::LimitExceeded
            );
            // Third index of the mesh triangle, now past the three vertices.
            buffer.pop();
            buffer[23] = 9.0f32.to_bits();
            assert_eq!(
                physim_scene_send(scene, buffer.as_ptr(), buffer.len()),
                physim_status::Validation
            );

            let mut len = 0usize;
            physim_scene_len(scene, &mut len);
            assert_eq!(len, 1);
            physim_scene_free(scene);
        }
    }

    #[test]
    fn new_scene_is_empty_and_counts_demo_objects() {
        let scene = physim_scene_new();
        assert!(!scene.is_null());
        let mut len = usize::MAX;
        unsafe {
            assert_eq!(physim_scene_len(scene, &mut len), physim_status::Ok);
            assert_eq!(len, 0);
            assert_eq!(physim_scene_add_demo_object(scene), physim_status::Ok);
            assert_eq!(physim_scene_len(scene, &mut len), physim_status::Ok);
            assert_eq!(len, 1);
            physim_scene_free(scene);
        }
    }

    #[test]
    fn null_arguments_are_rejected() {
        unsafe {
            let mut len = 0usize;
            assert_eq!(physim_scene_len(ptr::null(), &mut len), physim_status::NullPointer);
            assert_eq!(physim_scene_tick(ptr::null_mut(), 0.0), physim_status::NullPointer);
            assert_eq!(
                physim_scene_send(ptr::null_mut(), ptr::null(), 0),
                physim_status::NullPointer
            );
            assert_eq!(initScene(ptr::null(), 4), physim_status::NullPointer);
            assert_eq!(
                getAllData(ptr::null_mut(), ptr::null_mut()),
                physim_status::NullPointer
            );
            physim_scene_free(ptr::null_mut());
            physim_buffer_free(ptr::null_mut(), 0);
        }
    }

    #[test]
    fn process_wide_scene_follows_host_protocol() {
        let _guard = MAIN_LOCK.lock().unwrap();
        let empty = [0u32];
        unsafe {
            assert_eq!(initScene(empty.as_ptr(), empty.len()), physim_status::Ok);
        }
        let first = tester();
        let second = tester();
        assert_eq!(second, first.wrapping_add(1));
        assert_eq!(tickScene(0.25), physim_status::Ok);

        let mut data = ptr::null_mut();
        let mut words = 0usize;
        let buffer = unsafe {
            assert_eq!(getAllData(&mut data, &mut words), physim_status::Ok);
            take(data, words)
        };
        assert_eq!(buffer[0], 2);

        unsafe {
            assert_eq!(sendAllData(empty.as_ptr(), empty.len()), physim_status::Ok);
            assert_eq!(getAllData(&mut data, &mut words), physim_status::Ok);
            assert_eq!(take(data, words), vec![0]);
            assert_eq!(sendAllData(buffer.as_ptr(), buffer.len()), physim_status::Ok);
        }
        assert_eq!(main_scene().len(), 2);
    }

    #[test]
    fn every_status_has_a_message() {
        for status in [
            physim_status::Ok,
            physim_status::NullPointer,
            physim_status::Validation,
            physim_status::Truncated,
            physim_status::Malformed,
            physim_status::LimitExceeded,
            physim_status::Panic,
        ] {
            let text = unsafe { CStr::from_ptr(physim_status_message(status)) };
            assert!(!text.to_bytes().is_empty());
        }
    }
}
