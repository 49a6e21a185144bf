//! The simulation aggregate and its tick loop.

use myo_control::{CoupledTendonController, TendonController};
use myo_tendon::{ForceElement, LoadElement, TendonElement};
use myo_types::{
    ControllerId, CoupleId, ElasticId, LoadId, Result, SimError, SimulationConfig,
};
use myo_world::{Point2, PointGrab, RigidBodyHandle, Vector2, World};

/// A complete tendon-driven simulation.
///
/// Owns the world, the force elements, and the controllers, and hands out
/// registry ids for them. Elements are never removed; a scene reset
/// builds a fresh `Simulation`, so ids stay valid for the life of the
/// simulation that issued them.
pub struct Simulation {
    config: SimulationConfig,
    world: World,
    tendons: Vec<TendonElement>,
    loads: Vec<LoadElement>,
    controllers: Vec<TendonController>,
    couples: Vec<CoupledTendonController>,
    grab: Option<PointGrab>,
    paused: bool,
    frame: u64,
}

impl Simulation {
    /// Create an empty simulation.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let world = World::new(&config)?;
        Ok(Self {
            config,
            world,
            tendons: Vec::new(),
            loads: Vec::new(),
            controllers: Vec::new(),
            couples: Vec::new(),
            grab: None,
            paused: false,
            frame: 0,
        })
    }

    /// The simulation configuration.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The rigid-body world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the rigid-body world.
    #[must_use]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    // =========================================================================
    // Registries
    // =========================================================================

    /// Register a tendon element.
    pub fn add_tendon(&mut self, element: TendonElement) -> ElasticId {
        self.tendons.push(element);
        ElasticId::new(self.tendons.len() as u64 - 1)
    }

    /// Register a load element.
    pub fn add_load(&mut self, load: LoadElement) -> LoadId {
        self.loads.push(load);
        LoadId::new(self.loads.len() as u64 - 1)
    }

    /// Register a tendon controller.
    ///
    /// # Errors
    ///
    /// Returns an error if the controller references a tendon that is not
    /// in this simulation.
    pub fn add_controller(&mut self, controller: TendonController) -> Result<ControllerId> {
        let elastic = controller.elastic();
        if elastic.index() >= self.tendons.len() {
            return Err(SimError::UnknownElastic(elastic.raw()));
        }
        self.controllers.push(controller);
        Ok(ControllerId::new(self.controllers.len() as u64 - 1))
    }

    /// Register an antagonist controller couple.
    ///
    /// # Errors
    ///
    /// Returns an error if either side references an unknown controller,
    /// or both sides reference the same one.
    pub fn add_couple(&mut self, couple: CoupledTendonController) -> Result<CoupleId> {
        let extensor = couple.extensor_id();
        let flexor = couple.flexor_id();
        if extensor.index() >= self.controllers.len() {
            return Err(SimError::UnknownController(extensor.raw()));
        }
        if flexor.index() >= self.controllers.len() {
            return Err(SimError::UnknownController(flexor.raw()));
        }
        if extensor == flexor {
            return Err(SimError::DegenerateCouple(extensor.raw()));
        }
        self.couples.push(couple);
        Ok(CoupleId::new(self.couples.len() as u64 - 1))
    }

    /// A tendon element by id.
    #[must_use]
    pub fn tendon(&self, id: ElasticId) -> Option<&TendonElement> {
        self.tendons.get(id.index())
    }

    /// Mutable access to a tendon element by id.
    #[must_use]
    pub fn tendon_mut(&mut self, id: ElasticId) -> Option<&mut TendonElement> {
        self.tendons.get_mut(id.index())
    }

    /// A load element by id.
    #[must_use]
    pub fn load(&self, id: LoadId) -> Option<&LoadElement> {
        self.loads.get(id.index())
    }

    /// Mutable access to a load element by id.
    #[must_use]
    pub fn load_mut(&mut self, id: LoadId) -> Option<&mut LoadElement> {
        self.loads.get_mut(id.index())
    }

    /// A controller by id.
    #[must_use]
    pub fn controller(&self, id: ControllerId) -> Option<&TendonController> {
        self.controllers.get(id.index())
    }

    /// Mutable access to a controller by id.
    #[must_use]
    pub fn controller_mut(&mut self, id: ControllerId) -> Option<&mut TendonController> {
        self.controllers.get_mut(id.index())
    }

    /// A couple by id.
    #[must_use]
    pub fn couple(&self, id: CoupleId) -> Option<&CoupledTendonController> {
        self.couples.get(id.index())
    }

    /// The number of registered tendons.
    #[must_use]
    pub fn tendon_count(&self) -> usize {
        self.tendons.len()
    }

    /// The number of registered controllers.
    #[must_use]
    pub fn controller_count(&self) -> usize {
        self.controllers.len()
    }

    // =========================================================================
    // Control Inputs
    // =========================================================================

    /// Set a controller's target length offset.
    pub fn set_controller_target(&mut self, id: ControllerId, target: f64) -> Result<()> {
        self.controllers
            .get_mut(id.index())
            .ok_or(SimError::UnknownController(id.raw()))?
            .set_target(target);
        Ok(())
    }

    /// Set a couple's normalized target, fanning it out to both sides.
    pub fn set_couple_target(&mut self, id: CoupleId, target: f64) -> Result<()> {
        let couple = self
            .couples
            .get_mut(id.index())
            .ok_or(SimError::UnknownCouple(id.raw()))?;
        let (extensor, flexor) = pair_mut(
            &mut self.controllers,
            couple.extensor_id().index(),
            couple.flexor_id().index(),
        );
        couple.set_target(target, extensor, flexor);
        Ok(())
    }

    // =========================================================================
    // Tick Loop
    // =========================================================================

    /// Advance the simulation by one tick.
    ///
    /// Runs `outer_iterations` sub-steps of controllers → forces → world
    /// step → optional force clearing, then validates the world. A paused
    /// simulation returns immediately without touching any state.
    pub fn tick(&mut self) -> Result<()> {
        if self.paused {
            return Ok(());
        }

        let delta_t = self.config.timestep();
        for _ in 0..self.config.outer_iterations {
            for controller in &mut self.controllers {
                let element = &mut self.tendons[controller.elastic().index()];
                controller.update(element, &self.world, delta_t);
            }

            for tendon in &mut self.tendons {
                tendon.update_forces(&mut self.world, delta_t);
            }
            for load in &mut self.loads {
                load.update_forces(&mut self.world, delta_t);
            }
            if let Some(grab) = &mut self.grab {
                grab.update_forces(&mut self.world, delta_t);
            }

            self.world.step();
            if self.config.clear_forces {
                self.world.clear_forces();
            }
        }

        self.world.validate()?;
        self.frame += 1;
        Ok(())
    }

    /// Whether the simulation is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume the simulation.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            tracing::debug!(paused, frame = self.frame, "pause toggled");
        }
        self.paused = paused;
    }

    /// The number of completed ticks.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    // =========================================================================
    // Interactive Drag
    // =========================================================================

    /// Grab a body at a world-space point with a force-limited spring.
    ///
    /// Replaces any previous grab.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is static.
    pub fn begin_drag(
        &mut self,
        body: RigidBodyHandle,
        point: Point2<f64>,
        max_force: f64,
    ) -> Result<()> {
        let grab = PointGrab::new(&self.world, body, point, max_force)?;
        tracing::debug!(?body, "drag started");
        self.grab = Some(grab);
        Ok(())
    }

    /// Move the active grab's target point. No-op without an active grab.
    pub fn drag_to(&mut self, point: Point2<f64>) {
        if let Some(grab) = &mut self.grab {
            grab.set_target(point);
        }
    }

    /// Release the active grab.
    pub fn end_drag(&mut self) {
        if self.grab.take().is_some() {
            tracing::debug!("drag ended");
        }
    }

    /// The spring force of the active grab, for UI display.
    #[must_use]
    pub fn drag_force(&self) -> Option<Vector2<f64>> {
        self.grab.as_ref().map(PointGrab::reaction_force)
    }
}

/// Distinct mutable references into one slice.
///
/// Callers guarantee `a != b`; couples are validated on registration.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (low, high) = items.split_at_mut(b);
        (&mut low[a], &mut high[0])
    } else {
        let (low, high) = items.split_at_mut(a);
        (&mut high[0], &mut low[b])
    }
}
