mod forward;
mod round_trip;
