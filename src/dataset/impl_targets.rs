use super::{AsSingleTargets, DatasetBase, Records};
use ndarray::{ArrayBase, ArrayView1, Data, Ix1};

/// A NdArray can act as targets
impl<L, S: Data<Elem = L>> AsSingleTargets for ArrayBase<S, Ix1> {
    type Elem = L;

    fn as_single_targets(&self) -> ArrayView1<L> {
        self.view()
    }
}

impl<T: AsSingleTargets> AsSingleTargets for &T {
    type Elem = T::Elem;

    fn as_single_targets(&self) -> ArrayView1<Self::Elem> {
        (*self).as_single_targets()
    }
}

/// The targets of a dataset, so that predictions can be compared against it directly
impl<R: Records, T: AsSingleTargets> AsSingleTargets for DatasetBase<R, T> {
    type Elem = T::Elem;

    fn as_single_targets(&self) -> ArrayView1<Self::Elem> {
        self.targets.as_single_targets()
    }
}
