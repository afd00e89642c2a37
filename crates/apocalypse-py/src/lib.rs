use apocalypse_core::apocalypse::Apocalypse as CoreApocalypse;
use apocalypse_core::config::SimConfig;
use apocalypse_core::field::SourceKind;
use apocalypse_core::grid::Position;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// PyO3 module exposing apocalypse-core to Python drivers.
#[pyfunction]
fn version() -> &'static str {
    "0.1.0"
}

fn positions(cells: Option<Vec<(usize, usize)>>) -> Vec<Position> {
    cells
        .unwrap_or_default()
        .into_iter()
        .map(|(row, col)| Position::new(row, col))
        .collect()
}

fn tuples(cells: &[Position]) -> Vec<(usize, usize)> {
    cells.iter().map(|cell| (cell.row, cell.col)).collect()
}

fn parse_kind(kind: &str) -> PyResult<SourceKind> {
    match kind {
        "zombie" => Ok(SourceKind::Zombie),
        "human" => Ok(SourceKind::Human),
        other => Err(PyValueError::new_err(format!(
            "source kind must be 'zombie' or 'human', got {other:?}"
        ))),
    }
}

/// Grid pursuit simulation: zombies chase humans, humans flee zombies.
#[pyclass]
struct Apocalypse {
    inner: CoreApocalypse,
}

#[pymethods]
impl Apocalypse {
    #[new]
    #[pyo3(signature = (grid_height, grid_width, obstacles=None, zombies=None, humans=None, seed=42))]
    fn new(
        grid_height: usize,
        grid_width: usize,
        obstacles: Option<Vec<(usize, usize)>>,
        zombies: Option<Vec<(usize, usize)>>,
        humans: Option<Vec<(usize, usize)>>,
        seed: u64,
    ) -> PyResult<Self> {
        let config = SimConfig {
            grid_height,
            grid_width,
            obstacles: positions(obstacles),
            zombies: positions(zombies),
            humans: positions(humans),
            seed,
        };
        CoreApocalypse::try_new(config)
            .map(|inner| Self { inner })
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn add_zombie(&mut self, row: usize, col: usize) -> PyResult<()> {
        self.inner
            .add_zombie(Position::new(row, col))
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn add_human(&mut self, row: usize, col: usize) -> PyResult<()> {
        self.inner
            .add_human(Position::new(row, col))
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn num_zombies(&self) -> usize {
        self.inner.num_zombies()
    }

    fn num_humans(&self) -> usize {
        self.inner.num_humans()
    }

    fn zombies(&self) -> Vec<(usize, usize)> {
        tuples(self.inner.zombies())
    }

    fn humans(&self) -> Vec<(usize, usize)> {
        tuples(self.inner.humans())
    }

    fn compute_distance_field(&self, kind: &str) -> PyResult<Vec<Vec<usize>>> {
        Ok(self.inner.compute_distance_field(parse_kind(kind)?).to_rows())
    }

    /// Move every human one flee step away from the current zombies.
    fn move_humans(&mut self) {
        let field = self.inner.compute_distance_field(SourceKind::Zombie);
        self.inner.move_humans(&field);
    }

    /// Move every zombie one pursuit step toward the current humans.
    fn move_zombies(&mut self) {
        let field = self.inner.compute_distance_field(SourceKind::Human);
        self.inner.move_zombies(&field);
    }
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Apocalypse>()?;
    m.add_function(wrap_pyfunction!(version, m)?)?;
    Ok(())
}
