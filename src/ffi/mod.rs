use std::ffi::{c_char, CStr};
use std::ptr;
use crate::auv::VehicleController;
use crate::config::VehicleConfig;

//status codes, errors use ControlError::code()
pub const PICO_OK: i32 = 1;
pub const PICO_NULL_POINTER: i32 = -1;

pub struct PicoController{
    inner: VehicleController,
}

fn into_handle(inner: VehicleController) -> *mut PicoController{
    Box::into_raw(Box::new(PicoController{ inner }))
}

#[no_mangle]
pub extern "C" fn pico_controller_new_default() -> *mut PicoController{
    match VehicleController::pico(){
        Ok(inner) => into_handle(inner),
        Err(e) =>{
            log::error!("[ffi] default controller rejected: {}", e);
            ptr::null_mut()
        }
    }
}

//returns null when the JSON is unreadable or describes an invalid vehicle
#[no_mangle]
pub unsafe extern "C" fn pico_controller_new_from_json(json: *const c_char) -> *mut PicoController{
    if json.is_null(){
        return ptr::null_mut();
    }

    let text = unsafe{
        match CStr::from_ptr(json).to_str(){
            Ok(s) => s,
            Err(_) => return ptr::null_mut(),
        }
    };

    let built = VehicleConfig::from_json_str(text)
        .and_then(|cfg| VehicleController::new(&cfg));

    match built{
        Ok(inner) => into_handle(inner),
        Err(e) =>{
            log::error!("[ffi] controller construction failed: {}", e);
            ptr::null_mut()
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn pico_controller_free(handle: *mut PicoController){
    if !handle.is_null(){
        unsafe{ drop(Box::from_raw(handle)); }
    }
}

/// Run one control tick. `out_thrusts` must have room for 6 doubles and is
/// only written on success.
#[no_mangle]
pub unsafe extern "C" fn pico_controller_update(
    handle: *mut PicoController,
    set_points: *const f64,
    set_points_len: usize,
    process_points: *const f64,
    process_points_len: usize,
    dt: f64,
    out_thrusts: *mut f64,
) -> i32{
    if handle.is_null() || set_points.is_null() || process_points.is_null() || out_thrusts.is_null(){
        return PICO_NULL_POINTER;
    }

    unsafe{
        let ctrl = &mut *handle;
        let sp = std::slice::from_raw_parts(set_points, set_points_len);
        let pp = std::slice::from_raw_parts(process_points, process_points_len);

        match ctrl.inner.update_slices(sp, pp, dt){
            Ok(thrusts) =>{
                ptr::copy_nonoverlapping(thrusts.as_ptr(), out_thrusts, 6);
                PICO_OK
            }
            Err(e) => e.code(),
        }
    }
}

/// Copy the per-axis errors of the last tick into `out_errors` (6 doubles).
#[no_mangle]
pub unsafe extern "C" fn pico_controller_last_errors(
    handle: *mut PicoController,
    out_errors: *mut f64,
) -> i32{
    if handle.is_null() || out_errors.is_null(){
        return PICO_NULL_POINTER;
    }

    unsafe{
        let ctrl = &*handle;
        let errors = ctrl.inner.last_errors();
        ptr::copy_nonoverlapping(errors.as_ptr(), out_errors, 6);
    }
    PICO_OK
}

#[no_mangle]
pub unsafe extern "C" fn pico_controller_reset(handle: *mut PicoController) -> i32{
    if handle.is_null(){
        return PICO_NULL_POINTER;
    }
    unsafe{
        (*handle).inner.reset();
    }
    PICO_OK
}
