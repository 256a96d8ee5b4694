//! Q-table implementation for temporal difference learning

/// Q-table mapping (discrete state, action) pairs to Q-values
///
/// Storage is a single dense row-major array sized once at construction:
/// one extent per state dimension, times the action count. Entries start at
/// zero and are only ever mutated through [`QTable::set`] and the Q-learning
/// update; the table never resizes.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    /// Flat Q-values, innermost axis is the action
    values: Vec<f64>,
    /// Bin count per state dimension
    dims: Vec<usize>,
    /// Action-space size
    num_actions: usize,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
    /// Zero the bootstrap term on terminal transitions
    zero_terminal_bootstrap: bool,
}

impl QTable {
    /// Create a zero-initialized Q-table.
    ///
    /// `dims` are the per-dimension bin counts; `num_actions` is the size of
    /// the discrete action space. Hyperparameter domains are enforced by the
    /// agent constructor before this is called.
    pub fn new(
        dims: Vec<usize>,
        num_actions: usize,
        learning_rate: f64,
        discount_factor: f64,
        zero_terminal_bootstrap: bool,
    ) -> Self {
        let states: usize = dims.iter().product();
        Self {
            values: vec![0.0; states * num_actions],
            dims,
            num_actions,
            learning_rate,
            discount_factor,
            zero_terminal_bootstrap,
        }
    }

    /// Number of actions per state row.
    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Total number of stored entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn row_start(&self, state: &[usize]) -> usize {
        debug_assert_eq!(state.len(), self.dims.len());
        let mut index = 0;
        for (&coordinate, &extent) in state.iter().zip(&self.dims) {
            debug_assert!(coordinate < extent);
            index = index * extent + coordinate;
        }
        index * self.num_actions
    }

    /// Get the Q-value for a state-action pair
    pub fn get(&self, state: &[usize], action: usize) -> f64 {
        debug_assert!(action < self.num_actions);
        self.values[self.row_start(state) + action]
    }

    /// Set the Q-value for a state-action pair
    pub fn set(&mut self, state: &[usize], action: usize, value: f64) {
        debug_assert!(action < self.num_actions);
        let index = self.row_start(state) + action;
        self.values[index] = value;
    }

    /// Action with the maximum stored value for a state, with its value.
    ///
    /// Ties are broken by the lowest action index, so selection over a
    /// fresh (all-zero) row is deterministic.
    pub fn best_action(&self, state: &[usize]) -> (usize, f64) {
        let start = self.row_start(state);
        let row = &self.values[start..start + self.num_actions];
        let mut best_action = 0;
        let mut best_value = row[0];
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > best_value {
                best_action = action;
                best_value = value;
            }
        }
        (best_action, best_value)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The bootstrap term reads the successor state's best stored value, not
    /// the action the policy goes on to take. By default it is read even when
    /// `terminated` is set, matching the reference behavior; constructing the
    /// table with `zero_terminal_bootstrap` switches to the conventional
    /// zero-target form for terminal transitions.
    pub fn q_learning_update(
        &mut self,
        state: &[usize],
        action: usize,
        reward: f64,
        next_state: &[usize],
        terminated: bool,
    ) {
        let current_q = self.get(state, action);
        let max_next_q = if terminated && self.zero_terminal_bootstrap {
            0.0
        } else {
            self.best_action(next_state).1
        };
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state, action, new_q);
    }
}
