//! Use cases over the BI database. Report rendering lives elsewhere.

mod period;
mod registry;
mod ride;

pub use period::{period_for_time, period_list, PeriodDto};
pub use registry::{
    client_create, client_get, client_list, driver_register, ClientCreateReq, ClientDto,
    DriverDto, DriverRegisterReq, DRIVER_STATUS_PENDING,
};
pub use ride::{ride_append, ride_list, RideAppendReq, RideDto};
