pub mod m202607150001_create_users;
pub mod m202607150002_create_submissions;
pub mod m202607150003_create_osce_stations;
pub mod m202607150004_create_penalties;
