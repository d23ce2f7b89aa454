use pyo3::prelude::*;
use pyo3::exceptions::PyValueError;
use crate::auv::VehicleController;
use crate::config::VehicleConfig;
use crate::error::ControlError;

fn to_py_err(e: ControlError) -> PyErr{
    PyValueError::new_err(e.to_string())
}

#[pyclass]
pub struct PyPicoController{
    inner: VehicleController,
}

#[pymethods]
impl PyPicoController{
    //no config -> built-in Pico tuning
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self>{
        let config = match config_json{
            Some(json) => VehicleConfig::from_json_str(json).map_err(to_py_err)?,
            None => VehicleConfig::pico(),
        };
        let inner = VehicleController::new(&config).map_err(to_py_err)?;
        Ok(PyPicoController{ inner })
    }

    fn name(&self) -> String{
        self.inner.name().to_string()
    }

    fn update(&mut self, set_points: Vec<f64>, process_points: Vec<f64>, dt: f64) -> PyResult<Vec<f64>>{
        let thrusts = self.inner
            .update_slices(&set_points, &process_points, dt)
            .map_err(to_py_err)?;
        Ok(thrusts.iter().copied().collect())
    }

    fn reset(&mut self){
        self.inner.reset();
    }

    fn errors(&self) -> Vec<f64>{
        self.inner.last_errors().iter().copied().collect()
    }

    fn efforts(&self) -> Vec<f64>{
        self.inner.last_efforts().iter().copied().collect()
    }
}

#[pymodule]
fn pico_control(_py: Python, m: &PyModule) -> PyResult<()>{
    m.add_class::<PyPicoController>()?;
    Ok(())
}
